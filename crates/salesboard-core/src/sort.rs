//! Generic table sorting
//!
//! Sorts any row type by identifier (locale-insensitive string order) or by a
//! numeric metric. Rows whose metric is null always come after rows with a
//! value, whatever the direction. The sort is stable: ties keep input order.

use salesboard_types::{ComparisonRow, DimensionAggregate, SortDirection, SortState};
use std::cmp::Ordering;

/// Metric keys understood by the built-in row types
pub mod metric {
    pub const REVENUE: &str = "revenue";
    pub const PREV_REVENUE: &str = "prevRevenue";
    pub const REVENUE_DELTA: &str = "revenueDelta";
    pub const AVG_TICKET: &str = "avgTicket";
    pub const PREV_AVG_TICKET: &str = "prevAvgTicket";
    pub const TICKET_DELTA: &str = "ticketDelta";
    pub const ORDERS_COUNT: &str = "ordersCount";

    /// Keys a comparison table can be sorted by, besides "id"
    pub const COMPARISON_KEYS: [&str; 6] = [
        REVENUE,
        PREV_REVENUE,
        REVENUE_DELTA,
        AVG_TICKET,
        PREV_AVG_TICKET,
        TICKET_DELTA,
    ];
}

/// A table row with an identifier and named numeric metrics
pub trait SortableRow {
    fn id(&self) -> &str;

    /// Metric value for `key`; `None` when undefined or unknown
    fn metric(&self, key: &str) -> Option<f64>;
}

impl SortableRow for ComparisonRow {
    fn id(&self) -> &str {
        &self.id
    }

    fn metric(&self, key: &str) -> Option<f64> {
        match key {
            metric::REVENUE => Some(self.revenue),
            metric::PREV_REVENUE => Some(self.prev_revenue),
            metric::REVENUE_DELTA => self.revenue_delta,
            metric::AVG_TICKET => Some(self.avg_ticket),
            metric::PREV_AVG_TICKET => Some(self.prev_avg_ticket),
            metric::TICKET_DELTA => self.ticket_delta,
            _ => None,
        }
    }
}

impl SortableRow for DimensionAggregate {
    fn id(&self) -> &str {
        &self.id
    }

    fn metric(&self, key: &str) -> Option<f64> {
        match key {
            metric::REVENUE => Some(self.revenue),
            metric::AVG_TICKET => Some(self.avg_ticket),
            metric::ORDERS_COUNT => Some(self.orders_count as f64),
            _ => None,
        }
    }
}

/// Sort `rows` in place according to `state`.
///
/// With key "id" rows are ordered by [`collation_key`]; otherwise by
/// `accessor(row, key)`, where `None` (and NaN) sorts last in both
/// directions.
pub fn sort_rows<T, F>(rows: &mut [T], state: &SortState, accessor: F)
where
    T: SortableRow,
    F: Fn(&T, &str) -> Option<f64>,
{
    if state.is_id() {
        rows.sort_by(|a, b| {
            let ord = collation_key(a.id()).cmp(&collation_key(b.id()));
            directed(ord, state.direction)
        });
    } else {
        rows.sort_by(|a, b| {
            compare_metric(
                accessor(a, &state.key),
                accessor(b, &state.key),
                state.direction,
            )
        });
    }
}

/// Sorted copy of `rows`, using the rows' own metrics
pub fn sorted<T>(rows: &[T], state: &SortState) -> Vec<T>
where
    T: SortableRow + Clone,
{
    let mut out = rows.to_vec();
    sort_rows(&mut out, state, |row, key| row.metric(key));
    out
}

fn directed(ord: Ordering, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::Asc => ord,
        SortDirection::Desc => ord.reverse(),
    }
}

/// Null-last comparison of two optional metrics
fn compare_metric(a: Option<f64>, b: Option<f64>, direction: SortDirection) -> Ordering {
    let a = a.filter(|v| !v.is_nan());
    let b = b.filter(|v| !v.is_nan());

    match (a, b) {
        (Some(x), Some(y)) => directed(x.partial_cmp(&y).unwrap_or(Ordering::Equal), direction),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Case- and diacritic-insensitive sort key for identifiers.
///
/// Lowercases and maps accented Latin letters to their base letter, so
/// "Ágata", "agata" and "Agata" compare equal and "Éden" sorts with the e's.
pub fn collation_key(s: &str) -> String {
    let mut key = String::with_capacity(s.len());
    for c in s.chars().flat_map(char::to_lowercase) {
        match c {
            'ß' => key.push_str("ss"),
            'æ' => key.push_str("ae"),
            'œ' => key.push_str("oe"),
            _ => key.push(fold_diacritic(c)),
        }
    }
    key
}

fn fold_diacritic(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => 'a',
        'ç' | 'ć' | 'č' => 'c',
        'ď' | 'đ' => 'd',
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ė' | 'ę' | 'ě' => 'e',
        'ğ' => 'g',
        'ì' | 'í' | 'î' | 'ï' | 'ī' | 'į' | 'ı' => 'i',
        'ł' => 'l',
        'ñ' | 'ń' | 'ň' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ő' => 'o',
        'ř' => 'r',
        'ś' | 'š' | 'ş' => 's',
        'ť' | 'ţ' => 't',
        'ù' | 'ú' | 'û' | 'ü' | 'ū' | 'ů' | 'ű' => 'u',
        'ý' | 'ÿ' => 'y',
        'ź' | 'ż' | 'ž' => 'z',
        _ => c,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str, revenue: f64, delta: Option<f64>) -> ComparisonRow {
        ComparisonRow {
            id: id.to_string(),
            revenue,
            prev_revenue: 0.0,
            revenue_delta: delta,
            avg_ticket: 0.0,
            prev_avg_ticket: 0.0,
            ticket_delta: None,
        }
    }

    fn ids(rows: &[ComparisonRow]) -> Vec<&str> {
        rows.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_numeric_desc_and_asc() {
        let rows = vec![row("a", 10.0, None), row("b", 30.0, None), row("c", 20.0, None)];
        assert_eq!(ids(&sorted(&rows, &SortState::by("revenue"))), vec!["b", "c", "a"]);
        assert_eq!(
            ids(&sorted(&rows, &SortState::new("revenue", SortDirection::Asc))),
            vec!["a", "c", "b"]
        );
    }

    #[test]
    fn test_nulls_last_in_both_directions() {
        let rows = vec![
            row("n1", 0.0, None),
            row("low", 0.0, Some(-0.2)),
            row("n2", 0.0, None),
            row("high", 0.0, Some(0.8)),
        ];

        let desc = sorted(&rows, &SortState::by("revenueDelta"));
        assert_eq!(ids(&desc), vec!["high", "low", "n1", "n2"]);

        let asc = sorted(&rows, &SortState::new("revenueDelta", SortDirection::Asc));
        assert_eq!(ids(&asc), vec!["low", "high", "n1", "n2"]);
    }

    #[test]
    fn test_nan_metric_sorts_like_null() {
        let rows = vec![row("nan", f64::NAN, None), row("one", 1.0, None)];
        let asc = sorted(&rows, &SortState::new("revenue", SortDirection::Asc));
        assert_eq!(ids(&asc), vec!["one", "nan"]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let rows = vec![
            row("first", 5.0, None),
            row("second", 5.0, None),
            row("third", 5.0, None),
        ];
        for direction in [SortDirection::Asc, SortDirection::Desc] {
            let out = sorted(&rows, &SortState::new("revenue", direction));
            assert_eq!(ids(&out), vec!["first", "second", "third"]);
        }
    }

    #[test]
    fn test_id_sort_ignores_case_and_accents() {
        let rows = vec![
            row("Ótica", 0.0, None),
            row("eletrônicos", 0.0, None),
            row("Beleza", 0.0, None),
            row("Áudio", 0.0, None),
        ];
        let asc = sorted(&rows, &SortState::new("id", SortDirection::Asc));
        assert_eq!(ids(&asc), vec!["Áudio", "Beleza", "eletrônicos", "Ótica"]);

        let desc = sorted(&rows, &SortState::new("id", SortDirection::Desc));
        assert_eq!(ids(&desc), vec!["Ótica", "eletrônicos", "Beleza", "Áudio"]);
    }

    #[test]
    fn test_custom_accessor() {
        let mut rows = vec![row("a", 1.0, None), row("bb", 2.0, None), row("ccc", 3.0, None)];
        let state = SortState::new("idLength", SortDirection::Desc);
        sort_rows(&mut rows, &state, |r, _| Some(r.id.len() as f64));
        assert_eq!(ids(&rows), vec!["ccc", "bb", "a"]);
    }

    #[test]
    fn test_unknown_metric_keeps_order() {
        let rows = vec![row("x", 1.0, None), row("y", 2.0, None)];
        assert_eq!(ids(&sorted(&rows, &SortState::by("bogus"))), vec!["x", "y"]);
    }

    #[test]
    fn test_collation_key() {
        assert_eq!(collation_key("São Paulo"), "sao paulo");
        assert_eq!(collation_key("Straße"), "strasse");
        assert_eq!(collation_key("AÇÚCAR"), "acucar");
    }
}
