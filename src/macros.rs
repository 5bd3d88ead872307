/// Builds a [`Value`](crate::Value) from JSON-like syntax.
///
/// Arrays become plain (non-table) arrays and objects become tables in the order
/// their keys are written. Anything else is converted with `Value::from`.
///
/// # Examples
///
/// ```rust
/// use toml_tree::toml;
///
/// let server = toml!({
///     "host": "localhost",
///     "ports": [8080, 8081],
///     "tls": false
/// });
///
/// let table = server.as_table().unwrap();
/// assert_eq!(table.get_string("host").unwrap(), "localhost");
/// assert_eq!(table.get_array("ports").unwrap().len(), 2);
/// ```
#[macro_export]
macro_rules! toml {
    (true) => {
        $crate::Value::from(true)
    };

    (false) => {
        $crate::Value::from(false)
    };

    ([]) => {
        $crate::Value::from($crate::Array::new())
    };

    ([ $($elem:tt),* $(,)? ]) => {{
        let mut array = $crate::Array::new();
        $(
            array.push($crate::toml!($elem));
        )*
        $crate::Value::from(array)
    }};

    ({}) => {
        $crate::Value::from($crate::Table::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let table: $crate::Table = vec![
            $(
                ($key.to_string(), $crate::toml!($value)),
            )*
        ]
        .into_iter()
        .collect();
        $crate::Value::from(table)
    }};

    ($other:expr) => {
        $crate::Value::from($other)
    };
}
