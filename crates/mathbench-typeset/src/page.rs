// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Standalone HTML page around a rendered fragment.

use crate::latex::push_escaped;

/// Wrap `body` in a minimal HTML5 document titled `title`.
pub fn standalone_page(title: &str, body: &str) -> String {
    let mut out = String::with_capacity(body.len() + 256);
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>");
    push_escaped(&mut out, title);
    out.push_str("</title>\n<style>\n");
    out.push_str(PAGE_STYLE);
    out.push_str("</style>\n</head>\n<body>\n");
    out.push_str(body);
    if !body.ends_with('\n') {
        out.push('\n');
    }
    out.push_str("</body>\n</html>\n");
    out
}

const PAGE_STYLE: &str = "body { font-family: sans-serif; max-width: 48rem; margin: 2rem auto; }\n\
math[display=\"block\"] { margin: 1em 0; }\n\
.math-error { color: #cc0000; font-family: monospace; }\n";
