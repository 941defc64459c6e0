//! The attribute field of a feature record.

/// The delimiter between attribute pairs.
pub const PAIR_DELIMITER: char = ';';

/// The delimiter between an attribute key and its value.
pub const KEY_VALUE_DELIMITER: char = '=';

/// The parsed attribute field of a feature record.
///
/// Attributes are `key=value` pairs separated by [`PAIR_DELIMITER`]. Pairs are
/// kept in field order and repeated keys accumulate rather than overwrite, so
/// a record carrying several `inference` attributes exposes all of them.
/// Fragments without a [`KEY_VALUE_DELIMITER`] are dropped.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    /// Gets the value of the first attribute with the given key.
    ///
    /// # Examples
    ///
    /// ```
    /// use pancore::annotation::Attributes;
    ///
    /// let attributes = Attributes::from("ID=PEPPAN_g_1;locus_tag=b0001");
    ///
    /// assert_eq!(attributes.get("ID"), Some("PEPPAN_g_1"));
    /// assert_eq!(attributes.get("locus_tag"), Some("b0001"));
    /// assert_eq!(attributes.get("product"), None);
    /// ```
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the values of every attribute with the given key, in field
    /// order.
    ///
    /// # Examples
    ///
    /// ```
    /// use pancore::annotation::Attributes;
    ///
    /// let attributes = Attributes::from("inference=a;inference=b");
    /// let values = attributes.get_all("inference").collect::<Vec<_>>();
    ///
    /// assert_eq!(values, ["a", "b"]);
    /// ```
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.0
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the number of parsed attribute pairs.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether no attribute pairs were parsed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Attributes {
    fn from(s: &str) -> Self {
        let pairs = s
            .split(PAIR_DELIMITER)
            .filter_map(|pair| {
                let pair = pair.trim();
                pair.split_once(KEY_VALUE_DELIMITER)
                    .map(|(key, value)| (key.to_string(), value.to_string()))
            })
            .collect();

        Attributes(pairs)
    }
}

impl std::fmt::Display for Attributes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .iter()
                .map(|(key, value)| format!("{}{}{}", key, KEY_VALUE_DELIMITER, value))
                .collect::<Vec<_>>()
                .join(";")
        )
    }
}
