use serde::{Deserialize, Serialize};

use crate::analytics::{percentage, round2};
use crate::models::Trade;
use crate::strategy::Strategy;

/// How one rule of a strategy fared across the trades journaled against it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleStats {
    pub rule_id: u64,
    pub group: String,
    pub text: String,
    pub followed: usize,
    pub broken: usize,
    pub follow_rate: f64,
    pub win_rate_followed: f64,
    pub win_rate_broken: f64,
    /// Win rate when followed minus win rate when broken, in points.
    pub edge: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyReport {
    pub strategy_id: u64,
    pub name: String,
    pub trades: usize,
    pub win_rate: f64,
    pub net_pl: f64,
    pub fully_compliant_trades: usize,
    pub rules: Vec<RuleStats>,
}

impl StrategyReport {
    /// Rule adherence over the trades tagged with this strategy. Trades for
    /// other strategies, or untagged ones, are ignored.
    pub fn build(strategy: &Strategy, trades: &[Trade]) -> Self {
        let tagged: Vec<&Trade> = trades
            .iter()
            .filter(|t| t.strategy_id == Some(strategy.id))
            .collect();

        let wins = tagged.iter().filter(|t| t.is_win()).count();
        let net_pl: f64 = tagged.iter().map(|t| t.net_pl).sum();

        let fully_compliant_trades = tagged
            .iter()
            .filter(|t| strategy.rules().all(|r| t.follows_rule(r.id)))
            .count();

        let rules = strategy
            .groups
            .iter()
            .flat_map(|g| g.rules.iter().map(move |r| (g, r)))
            .map(|(group, rule)| {
                let (followed, broken): (Vec<&Trade>, Vec<&Trade>) =
                    tagged.iter().copied().partition(|t| t.follows_rule(rule.id));
                let win_rate_followed =
                    percentage(followed.iter().filter(|t| t.is_win()).count(), followed.len());
                let win_rate_broken =
                    percentage(broken.iter().filter(|t| t.is_win()).count(), broken.len());

                RuleStats {
                    rule_id: rule.id,
                    group: group.name.clone(),
                    text: rule.text.clone(),
                    followed: followed.len(),
                    broken: broken.len(),
                    follow_rate: percentage(followed.len(), tagged.len()),
                    win_rate_followed,
                    win_rate_broken,
                    edge: round2(win_rate_followed - win_rate_broken),
                }
            })
            .collect();

        StrategyReport {
            strategy_id: strategy.id,
            name: strategy.name.clone(),
            trades: tagged.len(),
            win_rate: percentage(wins, tagged.len()),
            net_pl: round2(net_pl),
            fully_compliant_trades,
            rules,
        }
    }

    /// Rules that were broken at least `min_sample` times and lost more often
    /// when broken, worst first.
    pub fn costly_rules(&self, min_sample: usize) -> Vec<&RuleStats> {
        let mut out: Vec<&RuleStats> = self
            .rules
            .iter()
            .filter(|r| r.broken >= min_sample && r.edge > 0.0)
            .collect();
        out.sort_by(|a, b| b.edge.total_cmp(&a.edge));
        out
    }

    pub fn print_summary(&self) {
        println!("\n{}", "=".repeat(50));
        println!("  STRATEGY  {}", self.name);
        println!("{}", "=".repeat(50));
        println!("  Trades:        {}", self.trades);
        println!("  Win Rate:      {:.1}%", self.win_rate);
        println!("  PnL:           ${:+.2}", self.net_pl);
        println!(
            "  By the book:   {} / {}",
            self.fully_compliant_trades, self.trades
        );
        if !self.rules.is_empty() {
            println!();
            println!("  RULES");
            println!("  ───────────────────────────────────");
            for r in &self.rules {
                println!(
                    "  [{}] {}: followed {:.0}% | WR {:.0}% vs {:.0}% broken",
                    r.group, r.text, r.follow_rate, r.win_rate_followed, r.win_rate_broken
                );
            }
            for r in self.costly_rules(3) {
                println!(
                    "  ! Breaking \"{}\" costs {:.0} points of win rate",
                    r.text, r.edge
                );
            }
        }
        println!("{}", "=".repeat(50));
    }
}
