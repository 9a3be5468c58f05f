//! The standard category tree.
//!
//! Paths and short names follow the conventions shared by the large body of
//! existing highlighting themes, so formatters can map short names straight
//! to CSS classes.

use super::Category;

/// One row of the static table.
pub(super) struct StandardEntry {
    pub path: &'static str,
    pub short: &'static str,
    /// Raw id of the parent. The root points at itself.
    pub parent: u32,
}

/// Declares the slot enum, the `Category` constants and the static table in
/// one place so the three can never disagree on ordering.
macro_rules! standard_categories {
    ($( $konst:ident => $path:literal, $short:literal, $parent:ident; )*) => {
        #[allow(non_camel_case_types, clippy::upper_case_acronyms)]
        #[repr(u32)]
        enum Slot {
            $( $konst, )*
        }

        impl Category {
            $(
                #[doc = concat!("`", $path, "`")]
                pub const $konst: Category = Category(Slot::$konst as u32);
            )*
        }

        pub(super) static STANDARD: &[StandardEntry] = &[
            $(
                StandardEntry {
                    path: $path,
                    short: $short,
                    parent: Slot::$parent as u32,
                },
            )*
        ];
    };
}

standard_categories! {
    ROOT => "Token", "", ROOT;

    TEXT => "Text", "", ROOT;
    WHITESPACE => "Text.Whitespace", "w", TEXT;
    ESCAPE => "Escape", "esc", ROOT;
    ERROR => "Error", "err", ROOT;
    OTHER => "Other", "x", ROOT;

    KEYWORD => "Keyword", "k", ROOT;
    KEYWORD_CONSTANT => "Keyword.Constant", "kc", KEYWORD;
    KEYWORD_DECLARATION => "Keyword.Declaration", "kd", KEYWORD;
    KEYWORD_NAMESPACE => "Keyword.Namespace", "kn", KEYWORD;
    KEYWORD_PSEUDO => "Keyword.Pseudo", "kp", KEYWORD;
    KEYWORD_RESERVED => "Keyword.Reserved", "kr", KEYWORD;
    KEYWORD_TYPE => "Keyword.Type", "kt", KEYWORD;
    KEYWORD_VARIABLE => "Keyword.Variable", "kv", KEYWORD;

    NAME => "Name", "n", ROOT;
    NAME_ATTRIBUTE => "Name.Attribute", "na", NAME;
    NAME_BUILTIN => "Name.Builtin", "nb", NAME;
    NAME_BUILTIN_PSEUDO => "Name.Builtin.Pseudo", "bp", NAME_BUILTIN;
    NAME_CLASS => "Name.Class", "nc", NAME;
    NAME_CONSTANT => "Name.Constant", "no", NAME;
    NAME_DECORATOR => "Name.Decorator", "nd", NAME;
    NAME_ENTITY => "Name.Entity", "ni", NAME;
    NAME_EXCEPTION => "Name.Exception", "ne", NAME;
    NAME_FUNCTION => "Name.Function", "nf", NAME;
    NAME_FUNCTION_MAGIC => "Name.Function.Magic", "fm", NAME_FUNCTION;
    NAME_PROPERTY => "Name.Property", "py", NAME;
    NAME_LABEL => "Name.Label", "nl", NAME;
    NAME_NAMESPACE => "Name.Namespace", "nn", NAME;
    NAME_OTHER => "Name.Other", "nx", NAME;
    NAME_TAG => "Name.Tag", "nt", NAME;
    NAME_VARIABLE => "Name.Variable", "nv", NAME;
    NAME_VARIABLE_CLASS => "Name.Variable.Class", "vc", NAME_VARIABLE;
    NAME_VARIABLE_GLOBAL => "Name.Variable.Global", "vg", NAME_VARIABLE;
    NAME_VARIABLE_INSTANCE => "Name.Variable.Instance", "vi", NAME_VARIABLE;
    NAME_VARIABLE_MAGIC => "Name.Variable.Magic", "vm", NAME_VARIABLE;

    LITERAL => "Literal", "l", ROOT;
    LITERAL_DATE => "Literal.Date", "ld", LITERAL;

    STRING => "Literal.String", "s", LITERAL;
    STRING_AFFIX => "Literal.String.Affix", "sa", STRING;
    STRING_BACKTICK => "Literal.String.Backtick", "sb", STRING;
    STRING_CHAR => "Literal.String.Char", "sc", STRING;
    STRING_DELIMITER => "Literal.String.Delimiter", "dl", STRING;
    STRING_DOC => "Literal.String.Doc", "sd", STRING;
    STRING_DOUBLE => "Literal.String.Double", "s2", STRING;
    STRING_ESCAPE => "Literal.String.Escape", "se", STRING;
    STRING_HEREDOC => "Literal.String.Heredoc", "sh", STRING;
    STRING_INTERPOL => "Literal.String.Interpol", "si", STRING;
    STRING_OTHER => "Literal.String.Other", "sx", STRING;
    STRING_REGEX => "Literal.String.Regex", "sr", STRING;
    STRING_SINGLE => "Literal.String.Single", "s1", STRING;
    STRING_SYMBOL => "Literal.String.Symbol", "ss", STRING;

    NUMBER => "Literal.Number", "m", LITERAL;
    NUMBER_BIN => "Literal.Number.Bin", "mb", NUMBER;
    NUMBER_FLOAT => "Literal.Number.Float", "mf", NUMBER;
    NUMBER_HEX => "Literal.Number.Hex", "mh", NUMBER;
    NUMBER_INTEGER => "Literal.Number.Integer", "mi", NUMBER;
    NUMBER_INTEGER_LONG => "Literal.Number.Integer.Long", "il", NUMBER_INTEGER;
    NUMBER_OCT => "Literal.Number.Oct", "mo", NUMBER;
    NUMBER_OTHER => "Literal.Number.Other", "mx", NUMBER;

    OPERATOR => "Operator", "o", ROOT;
    OPERATOR_WORD => "Operator.Word", "ow", OPERATOR;

    PUNCTUATION => "Punctuation", "p", ROOT;
    PUNCTUATION_INDICATOR => "Punctuation.Indicator", "pi", PUNCTUATION;

    COMMENT => "Comment", "c", ROOT;
    COMMENT_HASHBANG => "Comment.Hashbang", "ch", COMMENT;
    COMMENT_DOC => "Comment.Doc", "cd", COMMENT;
    COMMENT_MULTILINE => "Comment.Multiline", "cm", COMMENT;
    COMMENT_PREPROC => "Comment.Preproc", "cp", COMMENT;
    COMMENT_PREPROC_FILE => "Comment.Preproc.File", "cpf", COMMENT_PREPROC;
    COMMENT_SINGLE => "Comment.Single", "c1", COMMENT;
    COMMENT_SPECIAL => "Comment.Special", "cs", COMMENT;

    GENERIC => "Generic", "g", ROOT;
    GENERIC_DELETED => "Generic.Deleted", "gd", GENERIC;
    GENERIC_EMPH => "Generic.Emph", "ge", GENERIC;
    GENERIC_ERROR => "Generic.Error", "gr", GENERIC;
    GENERIC_HEADING => "Generic.Heading", "gh", GENERIC;
    GENERIC_INSERTED => "Generic.Inserted", "gi", GENERIC;
    GENERIC_LINENO => "Generic.Lineno", "gl", GENERIC;
    GENERIC_OUTPUT => "Generic.Output", "go", GENERIC;
    GENERIC_PROMPT => "Generic.Prompt", "gp", GENERIC;
    GENERIC_STRONG => "Generic.Strong", "gs", GENERIC;
    GENERIC_SUBHEADING => "Generic.Subheading", "gu", GENERIC;
    GENERIC_TRACEBACK => "Generic.Traceback", "gt", GENERIC;
}
