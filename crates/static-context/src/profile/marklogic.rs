use super::{Arity, Profile, ProfileId};

const CTS_NS: &str = "http://marklogic.com/cts";
const XDMP_NS: &str = "http://marklogic.com/xdmp";
const MAP_NS: &str = "http://marklogic.com/xdmp/map";

const XDMP: &[(&str, &[Arity])] = &[
    ("document-delete", &[1]),
    ("document-insert", &[2, 3, 4, 5, 6]),
    ("elapsed-time", &[0]),
    ("eval", &[1, 2, 3]),
    ("invoke", &[1, 2, 3]),
    ("log", &[1, 2]),
    ("node-uri", &[1]),
    ("quote", &[1, 2]),
    ("random", &[0, 1]),
    ("request-timestamp", &[0]),
    ("unquote", &[1, 2, 3]),
];

const CTS: &[(&str, &[Arity])] = &[
    ("and-query", &[1, 2]),
    ("collection-query", &[1]),
    ("directory-query", &[1, 2]),
    ("element-value-query", &[2, 3, 4, 5]),
    ("or-query", &[1, 2]),
    ("search", &[1, 2, 3, 4, 5]),
    ("uris", &[0, 1, 2, 3, 4, 5]),
    ("word-query", &[1, 2, 3]),
];

const MAP: &[(&str, &[Arity])] = &[
    ("contains", &[2]),
    ("count", &[1]),
    ("delete", &[2]),
    ("get", &[2]),
    ("keys", &[1]),
    ("map", &[0, 1]),
    ("new", &[0, 1]),
    ("put", &[3]),
];

/// `marklogic/8.0`: XQuery 3.0 plus the MarkLogic server modules. MarkLogic rebinds
/// `map` to its own map API.
pub(super) fn marklogic_8_0(base: &Profile) -> Profile {
    Profile::builder(ProfileId::new("marklogic", "8.0"))
        .extend(base)
        .namespace("cts", CTS_NS)
        .namespace("dbg", "http://marklogic.com/xdmp/debug")
        .namespace("dir", "http://marklogic.com/xdmp/directory")
        .namespace("error", "http://marklogic.com/xdmp/error")
        .namespace("json", "http://marklogic.com/xdmp/json")
        .namespace("map", MAP_NS)
        .namespace("prof", "http://marklogic.com/xdmp/profile")
        .namespace("sec", "http://marklogic.com/xdmp/security")
        .namespace("sem", "http://marklogic.com/semantics")
        .namespace("spell", "http://marklogic.com/xdmp/spell")
        .namespace("xdmp", XDMP_NS)
        .functions(XDMP_NS, XDMP)
        .variadic(XDMP_NS, "apply", &[1, 2, 3])
        .functions(CTS_NS, CTS)
        .functions(MAP_NS, MAP)
        .build()
}
