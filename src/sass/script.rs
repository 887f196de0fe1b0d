//! Ruby script generation
//!
//! Turns SCSS source plus the bridge's requires and load paths into a Ruby
//! program for the Sass engine. Everything user-supplied ends up inside Ruby
//! string literals, so it is escaped for that grammar here.

use super::ordered_set::OrderedSet;

/// Variable the generated script assigns the rendered CSS to
pub const RESULT_VARIABLE: &str = "result";

/// Syntax option passed to `Sass::Engine.new` (expanded SCSS, not indented Sass)
const SYNTAX_OPTION: &str = ":syntax => :scss";

/// Build the full Ruby program for one compilation
///
/// Layout: one `require` per dependency in insertion order, the engine
/// construction with the encoded source, the load path block, and finally
/// the render assigned to [`RESULT_VARIABLE`].
pub fn build_script(content: &str, requires: &OrderedSet, load_paths: &OrderedSet) -> String {
    let mut script = String::with_capacity(content.len() * 2 + 256);

    for require in requires.iter() {
        script.push_str(&format!("require '{}'\n", quote_single(require)));
    }

    script.push_str(&format!(
        "engine = Sass::Engine.new(\"{}\", {{{SYNTAX_OPTION}}})\n",
        encode_literal(content)
    ));

    script.push_str("engine.options[:load_paths].tap do |load_paths|\n");
    for load_path in load_paths.iter() {
        script.push_str(&format!(
            "  load_paths << Sass::Importers::Filesystem.new('{}')\n",
            escape_load_path(load_path)
        ));
    }
    script.push_str("end\n");

    script.push_str(&format!("{RESULT_VARIABLE} = engine.render\n"));
    script
}

/// Encode source text for a Ruby double-quoted literal
///
/// ASCII passes through with `\` doubled. Anything else becomes a `\uXXXX`
/// escape so the script itself stays pure ASCII; code points beyond the BMP
/// need Ruby's braced `\u{...}` form. `"` and `#` are escaped last so
/// interpolation (`#{}`) can never trigger.
pub fn encode_literal(content: &str) -> String {
    let mut encoded = String::with_capacity(content.len());
    for ch in content.chars() {
        let code = u32::from(ch);
        if ch.is_ascii() {
            if ch == '\\' {
                encoded.push('\\');
            }
            encoded.push(ch);
        } else if code <= 0xFFFF {
            encoded.push_str(&format!("\\u{code:04x}"));
        } else {
            encoded.push_str(&format!("\\u{{{code:x}}}"));
        }
    }
    encoded.replace('"', "\\\"").replace('#', "\\#")
}

/// Escape a load path for a single-quoted literal
///
/// Backslashes are normalized to `/` before quotes are escaped, otherwise the
/// quote escapes themselves would be rewritten.
pub fn escape_load_path(path: &str) -> String {
    path.replace('\\', "/").replace('\'', "\\'")
}

/// Escape a value for a single-quoted literal, keeping backslashes
fn quote_single(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}
