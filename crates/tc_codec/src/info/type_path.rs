/// Static naming information of a type.
///
/// Implemented by `#[derive(Codec)]`. The default path is
/// `module_path!()::Name`; `#[codec(type_path = "...")]` overrides it.
///
/// ```
/// use tc_codec::{derive::Codec, info::TypePath};
///
/// mod shapes {
///     # use tc_codec::derive::Codec;
///     #[derive(Codec)]
///     pub struct Circle;
///
///     #[derive(Codec)]
///     #[codec(type_path = "geo::Square")]
///     pub struct Square;
/// }
///
/// assert_eq!(shapes::Circle::type_name(), "Circle");
/// assert!(shapes::Circle::type_path().ends_with("::Circle"));
///
/// assert_eq!(shapes::Square::type_path(), "geo::Square");
/// assert_eq!(shapes::Square::module_path(), Some("geo"));
/// ```
pub trait TypePath: 'static {
    /// The full path, e.g. `app::model::User`.
    fn type_path() -> &'static str;

    /// The last path segment, e.g. `User`.
    fn type_name() -> &'static str;

    /// The path without the type name, e.g. `app::model`.
    fn module_path() -> Option<&'static str>;
}
