use std::collections::HashMap;

/// Path parameters of the current route, injected into a page at construction.
#[derive(Debug, Clone, Default)]
pub struct RouteParams {
    params: HashMap<String, String>,
}

impl RouteParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.params.insert(name.to_string(), value.to_string());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// The `id` parameter as an integer. `None` is the parse failure value and
    /// is forwarded to the server as-is.
    pub fn id(&self) -> Option<i64> {
        self.get("id").and_then(parse_leading_int)
    }
}

/// Leading-integer parse: optional whitespace, optional sign, then as many
/// decimal digits as follow. `"12abc"` is 12, `"abc"` is `None`. A `0x` or
/// `0X` prefix switches to hex, so `"0x1A"` is 26. Values that overflow `i64`
/// are `None` too.
pub fn parse_leading_int(input: &str) -> Option<i64> {
    let s = input.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let (radix, rest) = match rest.get(..2) {
        Some("0x") | Some("0X") => (16, &rest[2..]),
        _ => (10, rest),
    };

    let digits: Vec<u32> = rest.chars().map_while(|c| c.to_digit(radix)).collect();
    if digits.is_empty() {
        return None;
    }

    let mut value: i64 = 0;
    for digit in digits {
        let digit = i64::from(digit);
        value = value.checked_mul(i64::from(radix))?;
        value = if negative {
            value.checked_sub(digit)?
        } else {
            value.checked_add(digit)?
        };
    }

    Some(value)
}
