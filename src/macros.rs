/// Compile a literal pattern once and hand out a `&'static Regex`.
///
/// Only for fixed patterns that are part of the engine itself; locale patterns
/// are compiled (and validated) by `LocaleConfig`.
#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}
