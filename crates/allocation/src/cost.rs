//! Weighted-average cost estimate for purchases.

use stockplan_inventory::StockRecord;

/// Weighted-average unit cost across every record that carries a value,
/// regardless of category.
///
/// `None` when no record carries a value, or when the valued records hold no
/// units to divide by.
pub fn weighted_unit_cost<'a, I>(records: I) -> Option<f64>
where
    I: IntoIterator<Item = &'a StockRecord>,
{
    let mut total_value = 0.0;
    let mut total_quantity = 0.0;
    let mut valued = false;

    for record in records {
        if let Some(value) = record.monetary_total() {
            valued = true;
            total_value += value;
            total_quantity += record.quantity;
        }
    }

    if !valued || total_quantity <= 0.0 {
        return None;
    }
    Some(total_value / total_quantity)
}

/// Estimated spend for `purchase_quantity` units. Undefined cost stays
/// undefined; a defined cost with nothing to buy is zero.
pub fn estimate_cost(unit_cost: Option<f64>, purchase_quantity: f64) -> Option<f64> {
    unit_cost.map(|unit| {
        if purchase_quantity > 0.0 {
            unit * purchase_quantity
        } else {
            0.0
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockplan_inventory::{Category, StockValue};

    #[test]
    fn averages_value_over_matched_quantity() {
        let records = vec![
            StockRecord::new("PV1", Category::Pv, 60.0).with_value(StockValue::Total(300.0)),
            StockRecord::new("RP1", Category::Rp, 40.0).with_value(StockValue::Unit(5.0)),
        ];
        let unit = weighted_unit_cost(&records);
        assert_eq!(unit, Some(5.0));
        assert_eq!(estimate_cost(unit, 10.0), Some(50.0));
    }

    #[test]
    fn records_without_value_do_not_dilute_the_average() {
        let records = vec![
            StockRecord::new("PV1", Category::Pv, 10.0).with_value(StockValue::Total(40.0)),
            StockRecord::new("RP1", Category::Rp, 90.0),
        ];
        assert_eq!(weighted_unit_cost(&records), Some(4.0));
    }

    #[test]
    fn no_monetary_data_means_undefined_cost() {
        let records = vec![StockRecord::new("PV1", Category::Pv, 10.0)];
        let unit = weighted_unit_cost(&records);
        assert_eq!(unit, None);
        assert_eq!(estimate_cost(unit, 10.0), None);
    }

    #[test]
    fn valued_records_with_zero_quantity_are_undefined() {
        let records = vec![StockRecord::new("PV1", Category::Pv, 0.0).with_value(StockValue::Total(10.0))];
        assert_eq!(weighted_unit_cost(&records), None);
    }

    #[test]
    fn nothing_to_buy_costs_zero() {
        assert_eq!(estimate_cost(Some(7.5), 0.0), Some(0.0));
    }
}
