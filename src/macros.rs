/// Implements [`Configurable`](crate::Configurable) for a struct from a
/// `field: Type => "tag"` table.
///
/// ```
/// #[derive(Default)]
/// struct ServerConfig {
///     host: String,
///     port: i64,
/// }
///
/// shrmpl_conf::configurable! {
///     ServerConfig {
///         host: String => "host",
///         port: i64 => "port",
///     }
/// }
///
/// let mut config = ServerConfig::default();
/// shrmpl_conf::parse_config(&mut config, "host: 127.0.0.1\nport: 7171").unwrap();
/// assert_eq!(config.port, 7171);
/// ```
///
/// Every listed type must implement [`FieldValue`](crate::FieldValue); a
/// mismatch between the declared type and the struct field fails to compile.
#[macro_export]
macro_rules! configurable {
    ($name:ident { $($field:ident : $ty:ty => $tag:literal),* $(,)? }) => {
        impl $crate::Configurable for $name {
            fn fields() -> &'static [$crate::Field<Self>] {
                static FIELDS: &[$crate::Field<$name>] = &[
                    $(
                        $crate::Field::<$name>::new(
                            stringify!($field),
                            $tag,
                            <$ty as $crate::FieldValue>::KIND,
                            |record: &mut $name, raw: &str| {
                                <$ty as $crate::FieldValue>::assign(&mut record.$field, raw)
                            },
                            |record: &$name| <$ty as $crate::FieldValue>::render(&record.$field),
                        ),
                    )*
                ];
                FIELDS
            }
        }
    };
}
