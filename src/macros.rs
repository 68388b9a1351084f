#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

/// Build a [`Rule`](crate::Rule) from category variant names.
///
/// ```ignore
/// rule! {
///     id: "subject_verb",
///     pattern: [SubjectPronoun, VerbPhrase] => VerbPhrase,
///     condition: "adjacent",
/// }
/// ```
#[macro_export]
macro_rules! rule {
    (
        id: $id:expr,
        pattern: [ $($cat:ident),+ $(,)? ] => $result:ident
        $(, condition: $cond:expr)?
        $(, description: $desc:expr)?
        $(,)?
    ) => {{
        $crate::Rule {
            id: ::std::string::String::from($id),
            pattern: vec![ $($crate::Category::$cat),+ ],
            result: $crate::Category::$result,
            condition: ::std::option::Option::<::std::string::String>::None
                $( .or(Some(::std::string::String::from($cond))) )?,
            description: ::std::option::Option::<::std::string::String>::None
                $( .or(Some(::std::string::String::from($desc))) )?,
        }
    }};
}
