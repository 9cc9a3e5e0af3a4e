use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{TableError, TableKind};
use crate::tables::numeric::NumericField;
use crate::tables::{decode_entry, parse_object};
use crate::AudienceCode;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DateType {
    Fixed,
    /// Nth occurrence of a weekday within the month; occurrence 5 means the last one.
    NthWeekday,
    Unknown(i64),
}

impl DateType {
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => DateType::Fixed,
            1 => DateType::NthWeekday,
            other => DateType::Unknown(other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum WeightType {
    Base,
    Artistic,
    Commercial,
}

impl WeightType {
    pub const ALL: [WeightType; 3] = [WeightType::Base, WeightType::Artistic, WeightType::Commercial];

    pub fn code(self) -> &'static str {
        match self {
            WeightType::Base => "0",
            WeightType::Artistic => "1",
            WeightType::Commercial => "2",
        }
    }
}

pub fn bonus_key(code: AudienceCode, weight_type: WeightType) -> String {
    format!("{}|{}", code.as_str(), weight_type.code())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Holiday {
    pub id: String,
    pub date_type: DateType,
    pub day: i64,
    pub month: i64,
    pub day_of_week: i64,
    /// Keyed by `"<audienceCode>|<weightType>"`.
    pub audience_bonuses: BTreeMap<String, f64>,
}

impl Holiday {
    pub fn fixed(id: impl Into<String>, month: i64, day: i64) -> Self {
        Self {
            id: id.into(),
            date_type: DateType::Fixed,
            day,
            month,
            day_of_week: 0,
            audience_bonuses: BTreeMap::new(),
        }
    }

    pub fn nth_weekday(id: impl Into<String>, month: i64, occurrence: i64, day_of_week: i64) -> Self {
        Self {
            id: id.into(),
            date_type: DateType::NthWeekday,
            day: occurrence,
            month,
            day_of_week,
            audience_bonuses: BTreeMap::new(),
        }
    }

    pub fn with_bonus(mut self, code: AudienceCode, bonus: f64) -> Self {
        for weight_type in WeightType::ALL {
            self.audience_bonuses.insert(bonus_key(code, weight_type), bonus);
        }
        self
    }

    pub fn bonus(&self, code: AudienceCode, weight_type: WeightType) -> Option<f64> {
        self.audience_bonuses.get(&bonus_key(code, weight_type)).copied()
    }

    pub fn display_name(&self) -> String {
        self.id
            .split('_')
            .filter(|part| !part.is_empty())
            .map(|part| {
                let mut chars = part.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                    None => String::new(),
                }
            })
            .collect::<Vec<String>>()
            .join(" ")
    }

    pub fn display_date(&self) -> String {
        let month = month_name(self.month);
        match self.date_type {
            DateType::NthWeekday => {
                let occurrence = match self.day {
                    1 => "1st".to_string(),
                    2 => "2nd".to_string(),
                    3 => "3rd".to_string(),
                    4 => "4th".to_string(),
                    5 => "Last".to_string(),
                    other => format!("{}th", other),
                };
                let day_name = usize::try_from(self.day_of_week)
                    .ok()
                    .and_then(|index| DAY_NAMES.get(index))
                    .copied()
                    .unwrap_or("Day");
                format!("{} {} of {}", occurrence, day_name, month)
            }
            DateType::Fixed | DateType::Unknown(_) => format!("{} {}", month, self.day),
        }
    }
}

fn month_name(month: i64) -> String {
    usize::try_from(month - 1)
        .ok()
        .and_then(|index| MONTH_NAMES.get(index))
        .map(|name| name.to_string())
        .unwrap_or_else(|| format!("Month {}", month))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawHoliday {
    date_type: Option<NumericField>,
    day: Option<NumericField>,
    month: Option<NumericField>,
    day_of_week: Option<NumericField>,
    #[serde(default)]
    audience_bonuses: BTreeMap<String, NumericField>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HolidayTable {
    holidays: BTreeMap<String, Holiday>,
}

impl HolidayTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builtin() -> Self {
        let mut table = Self::new();
        table.insert(
            Holiday::fixed("VALENTINE", 2, 14)
                .with_bonus(AudienceCode::TM, 0.05)
                .with_bonus(AudienceCode::TF, 0.1)
                .with_bonus(AudienceCode::YM, 0.08)
                .with_bonus(AudienceCode::YF, 0.2)
                .with_bonus(AudienceCode::AM, 0.1),
        );
        table.insert(
            Holiday::fixed("HALLOWEEN", 10, 31)
                .with_bonus(AudienceCode::TM, 0.15)
                .with_bonus(AudienceCode::TF, 0.15)
                .with_bonus(AudienceCode::YM, 0.12)
                .with_bonus(AudienceCode::YF, 0.12),
        );
        table
    }

    pub fn insert(&mut self, holiday: Holiday) -> Option<Holiday> {
        self.holidays.insert(holiday.id.clone(), holiday)
    }

    pub fn get(&self, id: &str) -> Option<&Holiday> {
        self.holidays.get(id)
    }

    pub fn len(&self) -> usize {
        self.holidays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holidays.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Holiday> + '_ {
        self.holidays.values()
    }

    pub fn from_json_str(contents: &str) -> Result<Self, TableError> {
        let table_kind = TableKind::Holidays;
        let entries = parse_object(table_kind, contents)?;
        let mut table = Self::new();

        for (id, value) in entries {
            let Some(raw) = decode_entry::<RawHoliday>(table_kind, &id, value) else {
                continue;
            };

            let integer = |field: Option<&NumericField>, name: &str| -> Result<i64, TableError> {
                match field {
                    Some(value) => value.parse_integer(table_kind, &id, name),
                    None => Ok(0),
                }
            };

            let mut audience_bonuses = BTreeMap::new();
            for (key, field) in &raw.audience_bonuses {
                let bonus = field.parse(table_kind, &id, key)?;
                audience_bonuses.insert(key.clone(), bonus);
            }

            let holiday = Holiday {
                id: id.clone(),
                date_type: DateType::from_code(integer(raw.date_type.as_ref(), "dateType")?),
                day: integer(raw.day.as_ref(), "day")?,
                month: integer(raw.month.as_ref(), "month")?,
                day_of_week: integer(raw.day_of_week.as_ref(), "dayOfWeek")?,
                audience_bonuses,
            };
            table.insert(holiday);
        }

        Ok(table)
    }
}
