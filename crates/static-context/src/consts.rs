//! Namespace URIs defined by the W3C specifications.

pub const FNS: &str = "http://www.w3.org/2005/xpath-functions";
pub const ERR_NS: &str = "http://www.w3.org/2005/xqt-errors";
pub const LOCAL_NS: &str = "http://www.w3.org/2005/xquery-local-functions";
pub const MATH_NS: &str = "http://www.w3.org/2005/xpath-functions/math";
pub const MAP_NS: &str = "http://www.w3.org/2005/xpath-functions/map";
pub const ARRAY_NS: &str = "http://www.w3.org/2005/xpath-functions/array";
pub const OUTPUT_NS: &str = "http://www.w3.org/2010/xslt-xquery-serialization";
pub const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";
pub const XS_NS: &str = "http://www.w3.org/2001/XMLSchema";
pub const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Prefix reserved for namespace declaration attributes (`xmlns:p="..."`).
pub const XMLNS_PREFIX: &str = "xmlns";
