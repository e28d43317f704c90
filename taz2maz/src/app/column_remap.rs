use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// replaces values of an output column through a lookup table. values without an
/// entry are written unchanged.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct ColumnRemap {
    pub column: String,
    pub values: HashMap<String, String>,
}

impl ColumnRemap {
    pub fn apply<'a>(&'a self, value: &'a str) -> &'a str {
        self.values.get(value).map(|v| v.as_str()).unwrap_or(value)
    }
}

#[cfg(test)]
mod test {
    use super::ColumnRemap;

    #[test]
    fn test_unmapped_values_pass_through() {
        let remap: ColumnRemap = toml::from_str(
            "column = \"orig_purpose\"\nvalues = { eatout = \"Eating Out\", \"work_very high\" = \"Work\" }",
        )
        .expect("remap should parse");
        assert_eq!(remap.apply("eatout"), "Eating Out");
        assert_eq!(remap.apply("work_very high"), "Work");
        assert_eq!(remap.apply("Home"), "Home");
    }
}
