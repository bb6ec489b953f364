//! 30/360 US (Bond Basis) day count convention.

use rust_decimal::Decimal;

use super::DayCount;
use crate::types::Date;

#[inline]
fn is_last_day_of_february(date: Date) -> bool {
    date.month() == 2 && date.is_end_of_month()
}

/// 30/360 US day count convention (Bond Basis).
///
/// # Rules
///
/// 1. If D1 is the last day of February, change D1 to 30
/// 2. If D1 is 31, change D1 to 30
/// 3. If D2 is the last day of February AND D1 was last day of February, change D2 to 30
/// 4. If D2 is 31 AND D1 is now >= 30, change D2 to 30
///
/// # Formula
///
/// $$\text{Days} = 360 \times (Y_2 - Y_1) + 30 \times (M_2 - M_1) + (D_2 - D_1)$$
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Thirty360US;

impl DayCount for Thirty360US {
    fn name(&self) -> &'static str {
        "30/360"
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        let days = self.day_count(start, end);
        Decimal::from(days) / Decimal::from(360)
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        let y1 = start.year() as i64;
        let y2 = end.year() as i64;
        let m1 = start.month() as i64;
        let m2 = end.month() as i64;
        let mut d1 = start.day() as i64;
        let mut d2 = end.day() as i64;

        let d1_was_feb_eom = is_last_day_of_february(start);

        if d1_was_feb_eom || d1 == 31 {
            d1 = 30;
        }

        if is_last_day_of_february(end) && d1_was_feb_eom {
            d2 = 30;
        } else if d2 == 31 && d1 >= 30 {
            d2 = 30;
        }

        360 * (y2 - y1) + 30 * (m2 - m1) + (d2 - d1)
    }
}
