use serde_json::Value;

/// Token pair issued by a successful login
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthResult {
    pub token: String,
    pub subscriber_id: String,
}

/// Decoded body of the free-unit query, kept as raw JSON so that any shape
/// the portal returns can still be rendered.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UsageResponse(pub Value);

impl UsageResponse {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// First entry of the `body` list, if the portal returned any.
    pub fn first_entry(&self) -> Option<&Value> {
        self.0
            .get("body")
            .and_then(Value::as_array)
            .and_then(|items| items.first())
    }
}

/// One quota line: data allowance in GB plus the renewal countdown.
#[derive(Clone, Debug, PartialEq)]
pub struct QuotaRecord {
    pub used: f64,
    pub total: f64,
    pub remain: f64,
    pub remaining_days_for_renewal: Option<i64>,
}

impl QuotaRecord {
    /// Build a record from one `body` entry.
    ///
    /// Returns the name of the first missing or non-numeric field on failure.
    pub fn from_entry(entry: &Value) -> Result<Self, &'static str> {
        let used = number_field(entry, "used").ok_or("used")?;
        let total = number_field(entry, "total").ok_or("total")?;
        let remain = number_field(entry, "remain").ok_or("remain")?;
        let remaining_days_for_renewal = entry
            .get("freeUnitBeanDetailList")
            .and_then(Value::as_array)
            .and_then(|details| details.first())
            .and_then(|detail| integer_field(detail, "remainingDaysForRenewal"))
            .or_else(|| integer_field(entry, "remainingDaysForRenewal"));

        Ok(QuotaRecord {
            used,
            total,
            remain,
            remaining_days_for_renewal,
        })
    }

    /// Share of the allowance already consumed, `None` when `total` is zero.
    pub fn percent_used(&self) -> Option<f64> {
        if self.total == 0.0 {
            None
        } else {
            Some(self.used / self.total * 100.0)
        }
    }
}

// The portal mixes JSON numbers and numeric strings for the same fields.
fn number_field(value: &Value, key: &str) -> Option<f64> {
    match value.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn integer_field(value: &Value, key: &str) -> Option<i64> {
    match value.get(key)? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}
