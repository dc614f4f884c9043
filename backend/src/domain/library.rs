//! Libraries and their per-library lending parameters.
//!
//! A library owns every other record in the system. Loan periods come from
//! the library's active [`BorrowingSettings`]; fine rates come from its
//! active [`FineSettings`]. At most one of each may be active per library,
//! enforced by the data-access layer.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Months, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::context::ActorId;
use super::error::Error;
use super::ids::{BorrowingSettingsId, FineSettingsId, LibraryId};

/// The kind of institution a library is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LibraryType {
    Public,
    Academic,
    School,
    Industry,
}

/// Calendar band used for loan durations and fine accrual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DurationType {
    Days,
    Weeks,
    Months,
    Years,
}

impl DurationType {
    /// Seconds in one unit of this band.
    ///
    /// Months and years use the fixed civil approximations (30 and 365
    /// days) so fine amounts stay deterministic regardless of which month
    /// the loan straddled.
    pub const fn seconds_per_unit(self) -> i64 {
        match self {
            Self::Days => 86_400,
            Self::Weeks => 7 * 86_400,
            Self::Months => 30 * 86_400,
            Self::Years => 365 * 86_400,
        }
    }
}

impl fmt::Display for DurationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Days => "Days",
            Self::Weeks => "Weeks",
            Self::Months => "Months",
            Self::Years => "Years",
        };
        f.write_str(label)
    }
}

impl FromStr for DurationType {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Days" => Ok(Self::Days),
            "Weeks" => Ok(Self::Weeks),
            "Months" => Ok(Self::Months),
            "Years" => Ok(Self::Years),
            other => Err(Error::UnsupportedDurationType {
                value: other.to_owned(),
            }),
        }
    }
}

/// A physical library: the tenant every owned record belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Library {
    pub id: LibraryId,
    pub name: String,
    pub address: String,
    pub library_type: LibraryType,
    pub phone_number: String,
    pub email: Option<String>,
    /// The managing user whose actions resolve to this library.
    pub assigned_user: ActorId,
    pub active: bool,
}

/// How long this library lends book items out for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BorrowingSettings {
    pub id: BorrowingSettingsId,
    pub library: LibraryId,
    pub duration: u32,
    pub duration_type: DurationType,
    pub active: bool,
}

impl BorrowingSettings {
    /// Due date for a loan starting at `borrowed_date`.
    ///
    /// Days and weeks are fixed-length offsets; months and years follow
    /// the calendar (borrowing on 31 January for one month is due on the
    /// last day of February).
    pub fn due_date_from(&self, borrowed_date: DateTime<Utc>) -> Result<DateTime<Utc>, Error> {
        let due = match self.duration_type {
            DurationType::Days => {
                borrowed_date.checked_add_signed(Duration::days(i64::from(self.duration)))
            }
            DurationType::Weeks => {
                borrowed_date.checked_add_signed(Duration::weeks(i64::from(self.duration)))
            }
            DurationType::Months => borrowed_date.checked_add_months(Months::new(self.duration)),
            DurationType::Years => self
                .duration
                .checked_mul(12)
                .and_then(|months| borrowed_date.checked_add_months(Months::new(months))),
        };
        due.ok_or_else(|| Error::internal("due date computation overflowed"))
    }
}

/// The penalty rate this library charges per overdue unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FineSettings {
    pub id: FineSettingsId,
    pub library: LibraryId,
    pub duration_type: DurationType,
    /// Monetary rate charged per elapsed `duration_type` unit.
    pub rate: Decimal,
    pub active: bool,
}

impl FineSettings {
    /// Fine amount for a return at `returned_date` against `due_date`.
    ///
    /// The overdue delta is normalised into this settings row's calendar
    /// band as an exact ratio of seconds, then multiplied by the rate and
    /// rounded to two decimal places. An on-time return yields zero.
    pub fn amount_for(&self, due_date: DateTime<Utc>, returned_date: DateTime<Utc>) -> Decimal {
        let overdue_seconds = (returned_date - due_date).num_seconds();
        if overdue_seconds <= 0 {
            return Decimal::ZERO;
        }
        let units = Decimal::from(overdue_seconds)
            / Decimal::from(self.duration_type.seconds_per_unit());
        (units * self.rate).round_dp(2)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use chrono::TimeZone;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    use super::*;

    fn settings(duration: u32, duration_type: DurationType) -> BorrowingSettings {
        BorrowingSettings {
            id: BorrowingSettingsId::random(),
            library: LibraryId::random(),
            duration,
            duration_type,
            active: true,
        }
    }

    fn fine_settings(duration_type: DurationType, rate: Decimal) -> FineSettings {
        FineSettings {
            id: FineSettingsId::random(),
            library: LibraryId::random(),
            duration_type,
            rate,
            active: true,
        }
    }

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).single().expect("valid date")
    }

    #[rstest]
    #[case(7, DurationType::Days, at(2024, 3, 8))]
    #[case(2, DurationType::Weeks, at(2024, 3, 15))]
    #[case(1, DurationType::Months, at(2024, 4, 1))]
    #[case(1, DurationType::Years, at(2025, 3, 1))]
    fn due_date_applies_configured_band(
        #[case] duration: u32,
        #[case] duration_type: DurationType,
        #[case] expected: DateTime<Utc>,
    ) {
        let due = settings(duration, duration_type)
            .due_date_from(at(2024, 3, 1))
            .expect("due date computes");
        assert_eq!(due, expected);
    }

    #[test]
    fn month_arithmetic_clamps_to_end_of_month() {
        let due = settings(1, DurationType::Months)
            .due_date_from(at(2024, 1, 31))
            .expect("due date computes");
        assert_eq!(due, at(2024, 2, 29));
    }

    #[test]
    fn unknown_duration_type_fails_parsing() {
        let err = "Fortnights".parse::<DurationType>().expect_err("unsupported");
        assert_eq!(
            err,
            Error::UnsupportedDurationType {
                value: "Fortnights".to_owned()
            }
        );
    }

    #[rstest]
    #[case(DurationType::Days, dec!(2.00), 3, dec!(6.00))]
    #[case(DurationType::Weeks, dec!(7.00), 7, dec!(7.00))]
    #[case(DurationType::Months, dec!(30.00), 15, dec!(15.00))]
    #[case(DurationType::Years, dec!(365.00), 73, dec!(73.00))]
    fn fine_amount_normalises_delta_into_configured_unit(
        #[case] duration_type: DurationType,
        #[case] rate: Decimal,
        #[case] days_late: i64,
        #[case] expected: Decimal,
    ) {
        let due = at(2024, 3, 1);
        let returned = due + Duration::days(days_late);
        let amount = fine_settings(duration_type, rate).amount_for(due, returned);
        assert_eq!(amount, expected);
    }

    #[test]
    fn on_time_return_accrues_no_fine() {
        let due = at(2024, 3, 1);
        let amount = fine_settings(DurationType::Days, dec!(5)).amount_for(due, due);
        assert_eq!(amount, Decimal::ZERO);
    }

    #[test]
    fn partial_units_accrue_pro_rata() {
        let due = at(2024, 3, 1);
        let returned = due + Duration::hours(12);
        let amount = fine_settings(DurationType::Days, dec!(10)).amount_for(due, returned);
        assert_eq!(amount, dec!(5.00));
    }
}
