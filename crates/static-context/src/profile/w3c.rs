use super::{Arity, Profile, ProfileId};
use crate::consts::{
    ARRAY_NS, ERR_NS, FNS, LOCAL_NS, MAP_NS, MATH_NS, OUTPUT_NS, XML_NS, XS_NS, XSI_NS,
};

// ===== XQuery 1.0 / XPath 2.0 function library =====
const FN_1_0: &[(&str, &[Arity])] = &[
    ("abs", &[1]),
    ("adjust-dateTime-to-timezone", &[1, 2]),
    ("avg", &[1]),
    ("base-uri", &[0, 1]),
    ("boolean", &[1]),
    ("ceiling", &[1]),
    ("codepoint-equal", &[2]),
    ("codepoints-to-string", &[1]),
    ("collection", &[0, 1]),
    ("compare", &[2, 3]),
    ("contains", &[2, 3]),
    ("count", &[1]),
    ("current-date", &[0]),
    ("current-dateTime", &[0]),
    ("current-time", &[0]),
    ("data", &[1]),
    ("deep-equal", &[2, 3]),
    ("default-collation", &[0]),
    ("distinct-values", &[1, 2]),
    ("doc", &[1]),
    ("doc-available", &[1]),
    ("empty", &[1]),
    ("ends-with", &[2, 3]),
    ("error", &[0, 1, 2, 3]),
    ("exactly-one", &[1]),
    ("exists", &[1]),
    ("false", &[0]),
    ("floor", &[1]),
    ("id", &[1, 2]),
    ("idref", &[1, 2]),
    ("in-scope-prefixes", &[1]),
    ("index-of", &[2, 3]),
    ("insert-before", &[3]),
    ("lang", &[1, 2]),
    ("last", &[0]),
    ("local-name", &[0, 1]),
    ("local-name-from-QName", &[1]),
    ("lower-case", &[1]),
    ("matches", &[2, 3]),
    ("max", &[1, 2]),
    ("min", &[1, 2]),
    ("name", &[0, 1]),
    ("namespace-uri", &[0, 1]),
    ("namespace-uri-for-prefix", &[2]),
    ("namespace-uri-from-QName", &[1]),
    ("node-name", &[1]),
    ("normalize-space", &[0, 1]),
    ("normalize-unicode", &[1, 2]),
    ("not", &[1]),
    ("number", &[0, 1]),
    ("one-or-more", &[1]),
    ("position", &[0]),
    ("QName", &[2]),
    ("remove", &[2]),
    ("replace", &[3, 4]),
    ("resolve-QName", &[2]),
    ("resolve-uri", &[1, 2]),
    ("reverse", &[1]),
    ("root", &[0, 1]),
    ("round", &[1]),
    ("round-half-to-even", &[1, 2]),
    ("starts-with", &[2, 3]),
    ("static-base-uri", &[0]),
    ("string", &[0, 1]),
    ("string-join", &[2]),
    ("string-length", &[0, 1]),
    ("string-to-codepoints", &[1]),
    ("subsequence", &[2, 3]),
    ("substring", &[2, 3]),
    ("substring-after", &[2, 3]),
    ("substring-before", &[2, 3]),
    ("sum", &[1, 2]),
    ("tokenize", &[2, 3]),
    ("trace", &[2]),
    ("translate", &[3]),
    ("true", &[0]),
    ("unordered", &[1]),
    ("upper-case", &[1]),
    ("zero-or-one", &[1]),
];

// ===== XQuery 3.0 / XPath 3.0 additions (new names and new arities) =====
const FN_3_0: &[(&str, &[Arity])] = &[
    ("analyze-string", &[2, 3]),
    ("available-environment-variables", &[0]),
    ("data", &[0]),
    ("document-uri", &[0]),
    ("element-with-id", &[1, 2]),
    ("environment-variable", &[1]),
    ("filter", &[2]),
    ("fold-left", &[3]),
    ("fold-right", &[3]),
    ("for-each", &[2]),
    ("for-each-pair", &[3]),
    ("format-date", &[2, 5]),
    ("format-dateTime", &[2, 5]),
    ("format-integer", &[2, 3]),
    ("format-number", &[2, 3]),
    ("format-time", &[2, 5]),
    ("function-arity", &[1]),
    ("function-lookup", &[2]),
    ("function-name", &[1]),
    ("generate-id", &[0, 1]),
    ("has-children", &[0, 1]),
    ("head", &[1]),
    ("innermost", &[1]),
    ("nilled", &[0]),
    ("outermost", &[1]),
    ("parse-xml", &[1]),
    ("parse-xml-fragment", &[1]),
    ("path", &[0, 1]),
    ("round", &[2]),
    ("serialize", &[1, 2]),
    ("string-join", &[1]),
    ("tail", &[1]),
    ("unparsed-text", &[1, 2]),
    ("unparsed-text-available", &[1, 2]),
    ("unparsed-text-lines", &[1, 2]),
    ("uri-collection", &[0, 1]),
];

const MATH_3_0: &[(&str, &[Arity])] = &[
    ("acos", &[1]),
    ("asin", &[1]),
    ("atan", &[1]),
    ("atan2", &[2]),
    ("cos", &[1]),
    ("exp", &[1]),
    ("exp10", &[1]),
    ("log", &[1]),
    ("log10", &[1]),
    ("pi", &[0]),
    ("pow", &[2]),
    ("sin", &[1]),
    ("sqrt", &[1]),
    ("tan", &[1]),
];

// ===== XQuery 3.1 / XPath 3.1 additions =====
const FN_3_1: &[(&str, &[Arity])] = &[
    ("apply", &[2]),
    ("collation-key", &[1, 2]),
    ("contains-token", &[2, 3]),
    ("default-language", &[0]),
    ("json-doc", &[1, 2]),
    ("json-to-xml", &[1, 2]),
    ("load-xquery-module", &[1, 2]),
    ("parse-ietf-date", &[1]),
    ("parse-json", &[1, 2]),
    ("random-number-generator", &[0, 1]),
    ("sort", &[1, 2, 3]),
    ("tokenize", &[1]),
    ("trace", &[1]),
    ("transform", &[1]),
    ("xml-to-json", &[1, 2]),
];

const MAP_3_1: &[(&str, &[Arity])] = &[
    ("contains", &[2]),
    ("entry", &[2]),
    ("find", &[2]),
    ("for-each", &[2]),
    ("get", &[2]),
    ("keys", &[1]),
    ("merge", &[1, 2]),
    ("put", &[3]),
    ("remove", &[2]),
    ("size", &[1]),
];

const ARRAY_3_1: &[(&str, &[Arity])] = &[
    ("append", &[2]),
    ("filter", &[2]),
    ("flatten", &[1]),
    ("fold-left", &[3]),
    ("fold-right", &[3]),
    ("for-each", &[2]),
    ("for-each-pair", &[3]),
    ("get", &[2]),
    ("head", &[1]),
    ("insert-before", &[3]),
    ("join", &[1]),
    ("put", &[3]),
    ("remove", &[2]),
    ("reverse", &[1]),
    ("size", &[1]),
    ("sort", &[1, 2, 3]),
    ("subarray", &[2, 3]),
    ("tail", &[1]),
];

/// `w3c/1.0`: the editor baseline of eight predeclared prefixes.
pub(super) fn xquery_1_0() -> Profile {
    Profile::builder(ProfileId::new("w3c", "1.0"))
        .namespace("err", ERR_NS)
        .namespace("fn", FNS)
        .namespace("local", LOCAL_NS)
        .namespace("math", MATH_NS)
        .namespace("output", OUTPUT_NS)
        .namespace("xml", XML_NS)
        .namespace("xs", XS_NS)
        .namespace("xsi", XSI_NS)
        .functions(FNS, FN_1_0)
        .variadic(FNS, "concat", &[2, 3, 4])
        .build()
}

pub(super) fn xquery_3_0(base: &Profile) -> Profile {
    Profile::builder(ProfileId::new("w3c", "3.0"))
        .extend(base)
        .functions(FNS, FN_3_0)
        .functions(MATH_NS, MATH_3_0)
        .build()
}

pub(super) fn xquery_3_1(base: &Profile) -> Profile {
    Profile::builder(ProfileId::new("w3c", "3.1"))
        .extend(base)
        .namespace("array", ARRAY_NS)
        .namespace("map", MAP_NS)
        .functions(FNS, FN_3_1)
        .functions(MAP_NS, MAP_3_1)
        .functions(ARRAY_NS, ARRAY_3_1)
        .build()
}
