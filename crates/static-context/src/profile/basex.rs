use super::{Arity, Profile, ProfileId};

const MODULES: &[&str] = &[
    "admin", "archive", "client", "convert", "csv", "db", "fetch", "ft", "hash", "hof",
    "html", "index", "inspect", "jobs", "json", "lazy", "out", "proc", "prof", "random",
    "repo", "sql", "strings", "unit", "user", "validate", "web", "xquery", "xslt", "zip",
];

const EXPATH_MODULES: &[(&str, &str)] = &[
    ("bin", "http://expath.org/ns/binary"),
    ("crypto", "http://expath.org/ns/crypto"),
    ("file", "http://expath.org/ns/file"),
    ("http", "http://expath.org/ns/http-client"),
];

const DB: &[(&str, &[Arity])] = &[
    ("add", &[2, 3, 4]),
    ("create", &[1, 2, 3, 4]),
    ("delete", &[2]),
    ("drop", &[1]),
    ("exists", &[1, 2]),
    ("list", &[0, 1, 2]),
    ("open", &[1, 2]),
    ("optimize", &[1, 2, 3]),
    ("output", &[1]),
    ("replace", &[3, 4]),
];

const FILE: &[(&str, &[Arity])] = &[
    ("append", &[2, 3]),
    ("delete", &[1, 2]),
    ("exists", &[1]),
    ("is-dir", &[1]),
    ("list", &[1, 2, 3]),
    ("read-text", &[1, 2]),
    ("write", &[2, 3]),
];

const PROF: &[(&str, &[Arity])] = &[
    ("current-ms", &[0]),
    ("dump", &[1, 2]),
    ("memory", &[1, 2, 3]),
    ("time", &[1, 2, 3]),
];

const XQUERY: &[(&str, &[Arity])] = &[("eval", &[1, 2, 3]), ("invoke", &[1, 2, 3])];

const FETCH: &[(&str, &[Arity])] = &[
    ("binary", &[1]),
    ("content-type", &[1]),
    ("text", &[1, 2, 3]),
    ("xml", &[1, 2]),
];

const HOF: &[(&str, &[Arity])] = &[
    ("const", &[2]),
    ("fold-left1", &[2]),
    ("id", &[1]),
    ("top-k-by", &[3]),
    ("until", &[3]),
];

const OUT: &[(&str, &[Arity])] = &[("nl", &[0]), ("tab", &[0])];

fn module_ns(name: &str) -> String {
    format!("http://basex.org/modules/{name}")
}

/// `basex/8.4`: XQuery 3.1 plus the BaseX and EXPath modules.
pub(super) fn basex_8_4(base: &Profile) -> Profile {
    let mut b = Profile::builder(ProfileId::new("basex", "8.4")).extend(base);
    for m in MODULES {
        b = b.namespace(m, &module_ns(m));
    }
    for (prefix, uri) in EXPATH_MODULES {
        b = b.namespace(prefix, uri);
    }
    b.functions(&module_ns("db"), DB)
        .functions("http://expath.org/ns/file", FILE)
        .functions(&module_ns("prof"), PROF)
        .functions(&module_ns("xquery"), XQUERY)
        .functions(&module_ns("fetch"), FETCH)
        .functions(&module_ns("hof"), HOF)
        .functions(&module_ns("out"), OUT)
        .variadic(&module_ns("out"), "format", &[1, 2, 3])
        .build()
}
