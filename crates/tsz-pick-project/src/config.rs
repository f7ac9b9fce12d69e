use anyhow::{Context, Result, anyhow, bail};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};

/// Accepts JSON booleans and the string spellings `"true"`/`"false"`,
/// `"1"`/`"0"`, `"yes"`/`"no"`, `"on"`/`"off"` for boolean options.
fn deserialize_bool_or_string<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        String(String),
    }

    match Option::<BoolOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(BoolOrString::Bool(b)) => Ok(Some(b)),
        Some(BoolOrString::String(s)) => match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(Some(true)),
            "false" | "0" | "no" | "off" => Ok(Some(false)),
            _ => Err(Error::custom(format!(
                "invalid boolean value: '{}'. Expected true, false, 'true', or 'false'",
                s
            ))),
        },
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TsConfig {
    #[serde(default)]
    pub extends: Option<String>,
    #[serde(default)]
    pub compiler_options: Option<CompilerOptions>,
    #[serde(default)]
    pub include: Option<Vec<String>>,
    #[serde(default)]
    pub exclude: Option<Vec<String>>,
    #[serde(default)]
    pub files: Option<Vec<String>>,
}

/// The compiler options that change what the checker reports for a query.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CompilerOptions {
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub module: Option<String>,
    #[serde(default)]
    pub module_resolution: Option<String>,
    #[serde(default)]
    pub jsx: Option<String>,
    #[serde(default)]
    pub lib: Option<Vec<String>>,
    #[serde(default)]
    pub types: Option<Vec<String>>,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub paths: Option<FxHashMap<String, Vec<String>>>,
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub strict: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub strict_null_checks: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub no_implicit_any: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub allow_js: Option<bool>,
}

impl CompilerOptions {
    /// Whether `null` and `undefined` are tracked as distinct types.
    pub fn effective_strict_null_checks(&self) -> bool {
        self.strict_null_checks.or(self.strict).unwrap_or(false)
    }
}

/// Parse tsconfig source. Comments and trailing commas are accepted.
pub fn parse_tsconfig(source: &str) -> Result<TsConfig> {
    let normalized = normalize_jsonc(source);
    let config = serde_json::from_str(&normalized).context("failed to parse tsconfig JSON")?;
    Ok(config)
}

/// Load a tsconfig file, following its `extends` chain.
pub fn load_tsconfig(path: &Path) -> Result<TsConfig> {
    let mut visited = FxHashSet::default();
    load_tsconfig_inner(path, &mut visited)
}

fn load_tsconfig_inner(path: &Path, visited: &mut FxHashSet<PathBuf>) -> Result<TsConfig> {
    let canonical = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    if !visited.insert(canonical.clone()) {
        bail!("tsconfig extends cycle detected at {}", canonical.display());
    }

    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read tsconfig: {}", path.display()))?;
    let mut config = parse_tsconfig(&source)
        .with_context(|| format!("failed to parse tsconfig: {}", path.display()))?;

    if let Some(extends) = config.extends.take() {
        let base_path = resolve_extends_path(path, &extends)?;
        tracing::debug!(base = %base_path.display(), "following tsconfig extends");
        let base = load_tsconfig_inner(&base_path, visited)?;
        config = merge_configs(base, config);
    }

    visited.remove(&canonical);
    Ok(config)
}

fn resolve_extends_path(current_path: &Path, extends: &str) -> Result<PathBuf> {
    let base_dir = current_path
        .parent()
        .ok_or_else(|| anyhow!("tsconfig has no parent directory"))?;
    let mut candidate = PathBuf::from(extends);
    if candidate.extension().is_none() {
        candidate.set_extension("json");
    }
    if candidate.is_absolute() {
        Ok(candidate)
    } else {
        Ok(base_dir.join(candidate))
    }
}

/// Child settings win; unset child settings fall back to the base.
fn merge_configs(base: TsConfig, child: TsConfig) -> TsConfig {
    let compiler_options = match (base.compiler_options, child.compiler_options) {
        (Some(base), Some(child)) => Some(CompilerOptions {
            target: child.target.or(base.target),
            module: child.module.or(base.module),
            module_resolution: child.module_resolution.or(base.module_resolution),
            jsx: child.jsx.or(base.jsx),
            lib: child.lib.or(base.lib),
            types: child.types.or(base.types),
            base_url: child.base_url.or(base.base_url),
            paths: child.paths.or(base.paths),
            strict: child.strict.or(base.strict),
            strict_null_checks: child.strict_null_checks.or(base.strict_null_checks),
            no_implicit_any: child.no_implicit_any.or(base.no_implicit_any),
            allow_js: child.allow_js.or(base.allow_js),
        }),
        (base, child) => child.or(base),
    };

    TsConfig {
        extends: None,
        compiler_options,
        include: child.include.or(base.include),
        exclude: child.exclude.or(base.exclude),
        files: child.files.or(base.files),
    }
}

/// Strip `//` and `/* */` comments and drop commas that directly precede a
/// closing `}` or `]`. String contents are left untouched. Newlines inside
/// comments are kept so serde error positions still point at the right line.
fn normalize_jsonc(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string = false;
    let mut escape = false;
    // Index in `out` of a comma that may turn out to be trailing.
    let mut pending_comma: Option<usize> = None;

    while let Some(ch) = chars.next() {
        if in_string {
            out.push(ch);
            if escape {
                escape = false;
            } else if ch == '\\' {
                escape = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' => {
                pending_comma = None;
                in_string = true;
                out.push(ch);
            }
            '/' if chars.peek() == Some(&'/') => {
                for next in chars.by_ref() {
                    if next == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = '\0';
                for next in chars.by_ref() {
                    if prev == '*' && next == '/' {
                        break;
                    }
                    if next == '\n' {
                        out.push('\n');
                    }
                    prev = next;
                }
            }
            ',' => {
                pending_comma = Some(out.len());
                out.push(ch);
            }
            '}' | ']' => {
                if let Some(idx) = pending_comma.take() {
                    out.replace_range(idx..idx + 1, " ");
                }
                out.push(ch);
            }
            _ => {
                if !ch.is_whitespace() {
                    pending_comma = None;
                }
                out.push(ch);
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_boolean_true() {
        let json = r#"{"strict": true}"#;
        let opts: CompilerOptions = serde_json::from_str(json).unwrap();
        assert_eq!(opts.strict, Some(true));
    }

    #[test]
    fn test_parse_string_true() {
        let json = r#"{"strict": "true"}"#;
        let opts: CompilerOptions = serde_json::from_str(json).unwrap();
        assert_eq!(opts.strict, Some(true));
    }

    #[test]
    fn test_parse_alternate_boolean_spellings() {
        for (raw, expected) in [
            ("1", true),
            ("yes", true),
            ("ON", true),
            ("0", false),
            ("no", false),
            (" off ", false),
        ] {
            let json = format!(r#"{{"strictNullChecks": "{raw}"}}"#);
            let opts: CompilerOptions = serde_json::from_str(&json).unwrap();
            assert_eq!(opts.strict_null_checks, Some(expected), "{raw:?}");
        }
    }

    #[test]
    fn test_parse_invalid_string() {
        let json = r#"{"strict": "invalid"}"#;
        let result: Result<CompilerOptions, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_comments_and_trailing_commas() {
        let source = r#"{
            // line comment
            "compilerOptions": {
                /* block
                   comment */
                "strict": true,
                "lib": ["es2022", "dom",],
            },
            "include": ["src/**/*.ts"],
        }"#;
        let config = parse_tsconfig(source).unwrap();
        let opts = config.compiler_options.unwrap();
        assert_eq!(opts.strict, Some(true));
        assert_eq!(opts.lib.unwrap(), vec!["es2022", "dom"]);
        assert_eq!(config.include.unwrap(), vec!["src/**/*.ts"]);
    }

    #[test]
    fn test_comment_markers_inside_strings_survive() {
        let source = r#"{"compilerOptions": {"baseUrl": "./a//b/*c*/,"}}"#;
        let config = parse_tsconfig(source).unwrap();
        assert_eq!(
            config.compiler_options.unwrap().base_url.as_deref(),
            Some("./a//b/*c*/,")
        );
    }

    #[test]
    fn test_strict_implies_strict_null_checks() {
        let opts = CompilerOptions {
            strict: Some(true),
            ..Default::default()
        };
        assert!(opts.effective_strict_null_checks());

        let opts = CompilerOptions {
            strict: Some(true),
            strict_null_checks: Some(false),
            ..Default::default()
        };
        assert!(!opts.effective_strict_null_checks());
    }

    #[test]
    fn test_merge_prefers_child() {
        let base = parse_tsconfig(r#"{"compilerOptions": {"strict": true, "target": "es2017"}}"#)
            .unwrap();
        let child = parse_tsconfig(r#"{"compilerOptions": {"target": "es2022"}}"#).unwrap();
        let merged = merge_configs(base, child);
        let opts = merged.compiler_options.unwrap();
        assert_eq!(opts.target.as_deref(), Some("es2022"));
        assert_eq!(opts.strict, Some(true));
    }
}
