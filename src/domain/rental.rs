//! Closed-form rental property return calculator.
//!
//! All percentage inputs are whole numbers (7.0 means 7%). Ratio outputs are
//! returned as percentages as well. Every output is rounded to 2 decimals.

use serde::{Deserialize, Serialize};

use crate::domain::errors::ValidationError;
use crate::domain::units::round_to;

/// Closing costs assumed on top of the down payment, as a fraction of price.
pub const CLOSING_COST_RATE: f64 = 0.03;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentalInputs {
    pub purchase_price: f64,
    pub down_payment_percent: f64,
    pub interest_rate: f64,
    pub loan_term_years: u32,
    pub monthly_rent: f64,
    pub property_tax_percent: f64,
    pub annual_insurance: f64,
    pub maintenance_percent: f64,
    pub vacancy_percent: f64,
    pub management_fee_percent: f64,
    pub capex_percent: f64,
    pub appreciation_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentalResult {
    pub cap_rate: f64,
    pub cash_on_cash_return: f64,
    pub monthly_cash_flow: f64,
    pub annual_cash_flow: f64,
    pub total_return_percent: f64,
    /// Annual net operating income.
    pub noi: f64,
    pub total_cash_invested: f64,
}

impl RentalInputs {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let invalid = |field: &'static str, reason: &str| {
            Err(ValidationError::InvalidRentalInput {
                field,
                reason: reason.to_string(),
            })
        };

        if !(self.purchase_price.is_finite() && self.purchase_price > 0.0) {
            return invalid("purchase_price", "must be a positive number");
        }
        if self.loan_term_years == 0 {
            return invalid("loan_term_years", "must be at least 1 year");
        }

        let percents = [
            ("down_payment_percent", self.down_payment_percent),
            ("interest_rate", self.interest_rate),
            ("property_tax_percent", self.property_tax_percent),
            ("maintenance_percent", self.maintenance_percent),
            ("vacancy_percent", self.vacancy_percent),
            ("management_fee_percent", self.management_fee_percent),
            ("capex_percent", self.capex_percent),
        ];
        for (field, value) in percents {
            if !(0.0..=100.0).contains(&value) {
                return invalid(field, "must be between 0 and 100");
            }
        }

        // Appreciation may be negative; rent and insurance may not.
        if !self.appreciation_percent.is_finite() || self.appreciation_percent.abs() > 100.0 {
            return invalid("appreciation_percent", "must be between -100 and 100");
        }
        for (field, value) in [
            ("monthly_rent", self.monthly_rent),
            ("annual_insurance", self.annual_insurance),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return invalid(field, "must be zero or positive");
            }
        }
        Ok(())
    }
}

/// Level monthly payment for `principal` over `months` at `monthly_rate`.
/// A zero rate amortizes straight-line.
pub fn monthly_mortgage_payment(principal: f64, monthly_rate: f64, months: u32) -> f64 {
    let n = months as f64;
    if monthly_rate > 0.0 {
        let growth = (1.0 + monthly_rate).powf(n);
        principal * monthly_rate * growth / (growth - 1.0)
    } else {
        principal / n
    }
}

pub fn calculate_returns(inputs: &RentalInputs) -> Result<RentalResult, ValidationError> {
    inputs.validate()?;

    let price = inputs.purchase_price;
    let down_payment = price * (inputs.down_payment_percent / 100.0);
    let loan_amount = price - down_payment;

    let monthly_rate = inputs.interest_rate / 100.0 / 12.0;
    let monthly_mortgage =
        monthly_mortgage_payment(loan_amount, monthly_rate, inputs.loan_term_years * 12);

    let monthly_tax = price * inputs.property_tax_percent / 100.0 / 12.0;
    let monthly_insurance = inputs.annual_insurance / 12.0;
    let monthly_maintenance = price * inputs.maintenance_percent / 100.0 / 12.0;
    let monthly_capex = price * inputs.capex_percent / 100.0 / 12.0;

    let effective_rent = inputs.monthly_rent * (1.0 - inputs.vacancy_percent / 100.0);
    let management_fee = effective_rent * (inputs.management_fee_percent / 100.0);

    let operating_expenses =
        monthly_tax + monthly_insurance + monthly_maintenance + monthly_capex + management_fee;
    let monthly_noi = effective_rent - operating_expenses;
    let annual_noi = monthly_noi * 12.0;

    let cap_rate = annual_noi / price * 100.0;

    let monthly_cash_flow = monthly_noi - monthly_mortgage;
    let annual_cash_flow = monthly_cash_flow * 12.0;

    let total_cash_invested = down_payment + price * CLOSING_COST_RATE;
    let cash_on_cash_return = annual_cash_flow / total_cash_invested * 100.0;

    let annual_appreciation = price * (inputs.appreciation_percent / 100.0);
    let total_return_percent =
        (annual_cash_flow + annual_appreciation) / total_cash_invested * 100.0;

    Ok(RentalResult {
        cap_rate: round_to(cap_rate, 2),
        cash_on_cash_return: round_to(cash_on_cash_return, 2),
        monthly_cash_flow: round_to(monthly_cash_flow, 2),
        annual_cash_flow: round_to(annual_cash_flow, 2),
        total_return_percent: round_to(total_return_percent, 2),
        noi: round_to(annual_noi, 2),
        total_cash_invested: round_to(total_cash_invested, 2),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_inputs() -> RentalInputs {
        RentalInputs {
            purchase_price: 500_000.0,
            down_payment_percent: 20.0,
            interest_rate: 7.0,
            loan_term_years: 30,
            monthly_rent: 3500.0,
            property_tax_percent: 1.2,
            annual_insurance: 1200.0,
            maintenance_percent: 2.0,
            vacancy_percent: 5.0,
            management_fee_percent: 8.0,
            capex_percent: 1.0,
            appreciation_percent: 3.5,
        }
    }

    #[test]
    fn test_reference_property() {
        let result = calculate_returns(&reference_inputs()).unwrap();

        assert_eq!(result.noi, 14508.0);
        assert_eq!(result.cap_rate, 2.9);
        assert_eq!(result.monthly_cash_flow, -1452.21);
        assert_eq!(result.annual_cash_flow, -17426.52);
        assert_eq!(result.total_cash_invested, 115_000.0);
        assert_eq!(result.cash_on_cash_return, -15.15);
        assert_eq!(result.total_return_percent, 0.06);
    }

    #[test]
    fn test_mortgage_payment_standard_loan() {
        let payment = monthly_mortgage_payment(400_000.0, 0.07 / 12.0, 360);
        assert!((payment - 2661.21).abs() < 0.01);
    }

    #[test]
    fn test_zero_rate_is_straight_line() {
        let inputs = RentalInputs {
            interest_rate: 0.0,
            ..reference_inputs()
        };
        let result = calculate_returns(&inputs).unwrap();
        // 400k over 360 months = 1111.11; NOI 1209
        assert_eq!(result.monthly_cash_flow, 97.89);
        assert!(result.cash_on_cash_return.is_finite());
    }

    #[test]
    fn test_pure_function() {
        let a = calculate_returns(&reference_inputs()).unwrap();
        let b = calculate_returns(&reference_inputs()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        let inputs = RentalInputs {
            purchase_price: 0.0,
            ..reference_inputs()
        };
        assert!(matches!(
            calculate_returns(&inputs),
            Err(ValidationError::InvalidRentalInput {
                field: "purchase_price",
                ..
            })
        ));

        let inputs = RentalInputs {
            loan_term_years: 0,
            ..reference_inputs()
        };
        assert!(calculate_returns(&inputs).is_err());

        let inputs = RentalInputs {
            vacancy_percent: 140.0,
            ..reference_inputs()
        };
        assert!(calculate_returns(&inputs).is_err());
    }
}
