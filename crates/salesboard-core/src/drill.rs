//! Category drill-down state machine
//!
//! category -> subcategory -> final. The state holds only the filter context;
//! every transition that changes it requires the caller to re-fetch the
//! dimension rows scoped to the new context.

use salesboard_types::{CategoryFact, DimensionAggregate, DrillLevel, DrillState};

use crate::comparison::aggregate_by_id;

/// Group label for facts that have no value at the grouped level
pub const UNCATEGORIZED: &str = "(uncategorized)";

/// User action on the drill-down
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrillAction {
    /// Click on a row: drill into that value
    Select(String),
    /// Click on the root crumb: back to the initial state
    Reset,
    /// Click on the selected-category crumb: back to the subcategory list
    CategoryCrumb,
}

/// One crumb of the drill-down trail
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breadcrumb {
    pub label: String,
    /// Nesting level (0 = root)
    pub level: usize,
    /// Action triggered by a click; `None` for the current location
    pub action: Option<DrillAction>,
}

/// Raw fact label behind a displayed group label
fn fact_label(label: &str) -> String {
    if label == UNCATEGORIZED {
        String::new()
    } else {
        label.to_string()
    }
}

/// Fetch scope derived from a drill state.
///
/// Labels are raw fact values: the uncategorized group filters on "".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DrillFilter {
    pub category: Option<String>,
    pub subcategory: Option<String>,
}

/// Transitions and derived views of [`DrillState`]
pub trait DrillNavigation {
    /// Apply an action. Returns true when the context changed (re-fetch needed).
    fn apply(&mut self, action: DrillAction) -> bool;

    /// Crumb trail, starting with the root crumb labelled `root_label`
    fn breadcrumbs(&self, root_label: &str) -> Vec<Breadcrumb>;

    /// Filter context for the next fetch
    fn filter(&self) -> DrillFilter;

    /// Narrow flat category facts to this context and group them by the
    /// current level's label
    fn scope(&self, facts: &[CategoryFact]) -> Vec<DimensionAggregate>;
}

impl DrillNavigation for DrillState {
    fn apply(&mut self, action: DrillAction) -> bool {
        let next = match action {
            DrillAction::Reset => DrillState::default(),
            DrillAction::Select(value) => {
                if value.is_empty() {
                    return false;
                }
                match self.level {
                    DrillLevel::Category => DrillState {
                        level: DrillLevel::Subcategory,
                        category: value,
                        subcategory: String::new(),
                    },
                    DrillLevel::Subcategory => DrillState {
                        level: DrillLevel::Final,
                        category: self.category.clone(),
                        subcategory: value,
                    },
                    // Terminal level
                    DrillLevel::Final => return false,
                }
            }
            DrillAction::CategoryCrumb => match self.level {
                DrillLevel::Category => return false,
                DrillLevel::Subcategory | DrillLevel::Final => DrillState {
                    level: DrillLevel::Subcategory,
                    category: self.category.clone(),
                    subcategory: String::new(),
                },
            },
        };

        if next == *self {
            return false;
        }

        tracing::debug!(
            "Drill {:?} -> {:?} ({} / {})",
            self.level,
            next.level,
            next.category,
            next.subcategory
        );
        *self = next;
        true
    }

    fn breadcrumbs(&self, root_label: &str) -> Vec<Breadcrumb> {
        let mut crumbs = vec![Breadcrumb {
            label: root_label.to_string(),
            level: 0,
            action: Some(DrillAction::Reset),
        }];

        if self.level != DrillLevel::Category {
            crumbs.push(Breadcrumb {
                label: self.category.clone(),
                level: 1,
                action: Some(DrillAction::CategoryCrumb),
            });
        }
        if self.level == DrillLevel::Final {
            crumbs.push(Breadcrumb {
                label: self.subcategory.clone(),
                level: 2,
                action: None,
            });
        }

        // The last crumb is where we are
        if let Some(last) = crumbs.last_mut() {
            last.action = None;
        }
        crumbs
    }

    fn filter(&self) -> DrillFilter {
        match self.level {
            DrillLevel::Category => DrillFilter::default(),
            DrillLevel::Subcategory => DrillFilter {
                category: Some(fact_label(&self.category)),
                subcategory: None,
            },
            DrillLevel::Final => DrillFilter {
                category: Some(fact_label(&self.category)),
                subcategory: Some(fact_label(&self.subcategory)),
            },
        }
    }

    fn scope(&self, facts: &[CategoryFact]) -> Vec<DimensionAggregate> {
        let filter = self.filter();

        let lines = facts
            .iter()
            .filter(|f| filter.category.as_ref().is_none_or(|c| &f.category == c))
            .filter(|f| {
                filter
                    .subcategory
                    .as_ref()
                    .is_none_or(|s| &f.subcategory == s)
            })
            .map(|f| {
                let label = match self.level {
                    DrillLevel::Category => &f.category,
                    DrillLevel::Subcategory => &f.subcategory,
                    DrillLevel::Final => &f.final_category,
                };
                let label = if label.is_empty() {
                    UNCATEGORIZED.to_string()
                } else {
                    label.clone()
                };
                (label, f.revenue, f.orders_count)
            });

        aggregate_by_id(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn select(state: &mut DrillState, value: &str) -> bool {
        state.apply(DrillAction::Select(value.to_string()))
    }

    fn fact(category: &str, subcategory: &str, final_category: &str, revenue: f64) -> CategoryFact {
        CategoryFact {
            category: category.to_string(),
            subcategory: subcategory.to_string(),
            final_category: final_category.to_string(),
            revenue,
            orders_count: 1,
        }
    }

    #[test]
    fn test_initial_state() {
        let state = DrillState::default();
        assert_eq!(state.level, DrillLevel::Category);
        assert!(state.category.is_empty());
        assert!(state.subcategory.is_empty());
    }

    #[test]
    fn test_drill_down_and_back() {
        let mut state = DrillState::default();

        assert!(select(&mut state, "Eletrônicos"));
        assert_eq!(
            state,
            DrillState {
                level: DrillLevel::Subcategory,
                category: "Eletrônicos".to_string(),
                subcategory: String::new(),
            }
        );

        assert!(select(&mut state, "Acessórios"));
        assert_eq!(
            state,
            DrillState {
                level: DrillLevel::Final,
                category: "Eletrônicos".to_string(),
                subcategory: "Acessórios".to_string(),
            }
        );

        assert!(state.apply(DrillAction::CategoryCrumb));
        assert_eq!(state.level, DrillLevel::Subcategory);
        assert_eq!(state.category, "Eletrônicos");
        assert!(state.subcategory.is_empty());
    }

    #[test]
    fn test_final_level_is_terminal() {
        let mut state = DrillState::default();
        select(&mut state, "Casa");
        select(&mut state, "Cozinha");
        let before = state.clone();

        assert!(!select(&mut state, "Panelas"));
        assert_eq!(state, before);
    }

    #[test]
    fn test_reset_from_any_state() {
        let mut state = DrillState::default();
        assert!(!state.apply(DrillAction::Reset));

        select(&mut state, "Casa");
        assert!(state.apply(DrillAction::Reset));
        assert_eq!(state, DrillState::default());

        select(&mut state, "Casa");
        select(&mut state, "Cozinha");
        assert!(state.apply(DrillAction::Reset));
        assert_eq!(state, DrillState::default());
    }

    #[test]
    fn test_noop_actions() {
        let mut state = DrillState::default();
        assert!(!select(&mut state, ""));
        assert!(!state.apply(DrillAction::CategoryCrumb));

        select(&mut state, "Casa");
        assert!(!state.apply(DrillAction::CategoryCrumb));
    }

    #[test]
    fn test_breadcrumbs_per_level() {
        let mut state = DrillState::default();
        let crumbs = state.breadcrumbs("All categories");
        assert_eq!(crumbs.len(), 1);
        assert_eq!(crumbs[0].action, None);

        select(&mut state, "Eletrônicos");
        select(&mut state, "Acessórios");
        let crumbs = state.breadcrumbs("All categories");
        let labels: Vec<_> = crumbs.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["All categories", "Eletrônicos", "Acessórios"]);
        assert_eq!(crumbs[0].action, Some(DrillAction::Reset));
        assert_eq!(crumbs[1].action, Some(DrillAction::CategoryCrumb));
        assert_eq!(crumbs[2].action, None);
    }

    #[test]
    fn test_drill_into_uncategorized_group() {
        let facts = vec![
            fact("Casa", "Cozinha", "Panelas", 50.0),
            fact("", "", "", 30.0),
            fact("", "Avulsos", "", 40.0),
        ];

        let mut state = DrillState::default();
        let top = state.scope(&facts);
        assert_eq!(top[1].id, UNCATEGORIZED);
        assert_eq!(top[1].revenue, 70.0);

        assert!(select(&mut state, UNCATEGORIZED));
        assert_eq!(state.category, UNCATEGORIZED);
        assert_eq!(state.filter().category.as_deref(), Some(""));

        let subs = state.scope(&facts);
        let ids: Vec<_> = subs.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec![UNCATEGORIZED, "Avulsos"]);
        assert_eq!(subs.iter().map(|a| a.revenue).sum::<f64>(), 70.0);

        assert!(select(&mut state, UNCATEGORIZED));
        let leaves = state.scope(&facts);
        assert_eq!(leaves.len(), 1);
        assert_eq!(leaves[0].revenue, 30.0);
    }

    #[test]
    fn test_filter_follows_level() {
        let mut state = DrillState::default();
        assert_eq!(state.filter(), DrillFilter::default());

        select(&mut state, "Casa");
        assert_eq!(state.filter().category.as_deref(), Some("Casa"));
        assert_eq!(state.filter().subcategory, None);
    }

    #[test]
    fn test_scope_groups_by_current_level() {
        let facts = vec![
            fact("Casa", "Cozinha", "Panelas", 100.0),
            fact("Casa", "Cozinha", "Talheres", 50.0),
            fact("Casa", "Banho", "Toalhas", 30.0),
            fact("Eletrônicos", "Acessórios", "Cabos", 80.0),
            fact("Eletrônicos", "", "", 5.0),
        ];

        let mut state = DrillState::default();
        let top = state.scope(&facts);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].id, "Casa");
        assert_eq!(top[0].revenue, 180.0);
        assert_eq!(top[0].orders_count, 3);

        select(&mut state, "Eletrônicos");
        let subs = state.scope(&facts);
        assert_eq!(subs.len(), 2);
        assert_eq!(subs[1].id, UNCATEGORIZED);

        state.apply(DrillAction::Reset);
        select(&mut state, "Casa");
        select(&mut state, "Cozinha");
        let leaves = state.scope(&facts);
        let ids: Vec<_> = leaves.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["Panelas", "Talheres"]);
    }
}
