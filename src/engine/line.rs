use crate::model::{LabourLine, MaterialLine};

use super::{num, percent_of};

/// Raw cost of a single entry. No rounding: callers sum full-precision
/// values and round only for display.
pub trait LineCost {
    fn cost(&self) -> f64;
}

impl LineCost for MaterialLine {
    fn cost(&self) -> f64 {
        num(self.quantity) * num(self.unit_price)
    }
}

impl LineCost for LabourLine {
    fn cost(&self) -> f64 {
        num(self.hours) * num(self.rate_per_hour)
    }
}

/// Sum of line costs. Order does not matter beyond float summation.
pub fn total_cost<L: LineCost>(lines: &[L]) -> f64 {
    lines.iter().map(LineCost::cost).sum()
}

/// VAT a material line carries under per-material VAT
pub fn material_vat(line: &MaterialLine) -> f64 {
    percent_of(line.cost(), line.vat_percentage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WorkType;

    #[test]
    fn test_material_cost() {
        let line = MaterialLine::new("Cement", 5.0, 20.0);
        assert_eq!(line.cost(), 100.0);
    }

    #[test]
    fn test_labour_cost_ignores_work_type() {
        let a = LabourLine::new(WorkType::DailyWages, 8.0, 10.0);
        let b = LabourLine::new(WorkType::PieceRate, 8.0, 10.0);
        let c = LabourLine::new(WorkType::Contract, 8.0, 10.0);
        assert_eq!(a.cost(), 80.0);
        assert_eq!(b.cost(), 80.0);
        assert_eq!(c.cost(), 80.0);
    }

    #[test]
    fn test_non_finite_inputs_count_as_zero() {
        let line = MaterialLine::new("Sand", f64::NAN, 20.0);
        assert_eq!(line.cost(), 0.0);
        let line = LabourLine::new(WorkType::Contract, 3.0, f64::INFINITY);
        assert_eq!(line.cost(), 0.0);
    }

    #[test]
    fn test_negative_inputs_pass_through() {
        let line = MaterialLine::new("Credit", -2.0, 15.0);
        assert_eq!(line.cost(), -30.0);
    }

    #[test]
    fn test_total_cost_no_rounding() {
        let lines = vec![
            MaterialLine::new("a", 1.0, 0.1),
            MaterialLine::new("b", 1.0, 0.2),
        ];
        assert_eq!(total_cost(&lines), 0.1 + 0.2);
        assert_eq!(total_cost::<LabourLine>(&[]), 0.0);
    }

    #[test]
    fn test_material_vat() {
        let mut line = MaterialLine::new("Tiles", 10.0, 50.0);
        line.vat_percentage = 5.0;
        assert_eq!(material_vat(&line), 25.0);
    }
}
