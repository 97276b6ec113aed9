use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BusinessHourType {
    #[default]
    Default,
    Custom,
}

impl BusinessHourType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BusinessHourType::Default => "default",
            BusinessHourType::Custom => "custom",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timezone {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkDay {
    pub day: String,
    pub open: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessHour {
    #[serde(rename = "_id")]
    pub id: String,
    /// Empty for the default business hour.
    #[serde(default)]
    pub name: String,
    pub timezone: Timezone,
    #[serde(default)]
    pub work_hours: Vec<WorkDay>,
    pub active: bool,
    #[serde(rename = "type", default)]
    pub kind: BusinessHourType,
}

impl BusinessHour {
    /// Only named hours may be removed.
    pub fn is_removable(&self) -> bool {
        !self.name.is_empty()
    }

    pub fn open_days(&self) -> impl Iterator<Item = &str> {
        self.work_hours
            .iter()
            .filter(|day| day.open)
            .map(|day| day.day.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_business_hour_wire_format() {
        let hour: BusinessHour = serde_json::from_str(
            r#"{
                "_id": "bh1",
                "timezone": {"name": "America/Sao_Paulo"},
                "workHours": [{"day": "Monday", "open": true}, {"day": "Sunday", "open": false}],
                "active": true,
                "type": "default"
            }"#,
        )
        .unwrap();

        assert_eq!(hour.name, "");
        assert!(!hour.is_removable());
        assert_eq!(hour.kind, BusinessHourType::Default);
        assert_eq!(hour.open_days().collect::<Vec<_>>(), vec!["Monday"]);
    }
}
