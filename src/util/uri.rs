use percent_encoding::{AsciiSet, CONTROLS};
use std::borrow::Cow;
use std::path::{Component, Path, PathBuf};

/// Characters that must be percent-encoded within an href path.
const HREF_PATH: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

pub(crate) fn parent(href: &str) -> &str {
    href.rfind('/')
        .map_or("", |index| if index == 0 { "/" } else { &href[..index] })
}

pub(crate) fn decode(encoded: &str) -> Cow<'_, str> {
    percent_encoding::percent_decode_str(encoded).decode_utf8_lossy()
}

pub(crate) fn encode(decoded: &str) -> Cow<'_, str> {
    percent_encoding::utf8_percent_encode(decoded, HREF_PATH).into()
}

/// Splits `href` at the first `#` into its path and fragment.
pub(crate) fn split_fragment(href: &str) -> (&str, Option<&str>) {
    match href.split_once('#') {
        Some((path, fragment)) => (path, Some(fragment)),
        None => (href, None),
    }
}

pub(crate) fn normalize(href: &str) -> String {
    let mut buf = PathBuf::from(href);
    normalize_href_path(&mut buf);

    // 1: `buf` is UTF-8 as its data derives from `href`.
    // 2: Ensure separators are forward slashes.
    buf.to_string_lossy().replace('\\', "/")
}

/// Resolve a child path against its parent, normalizing if necessary.
pub(crate) fn resolve<'a>(parent_dir: &str, relative: &'a str) -> Cow<'a, str> {
    let (main_href, frag) = relative
        .find(['?', '#'])
        .map(|position| (&relative[..position], &relative[position..]))
        .unwrap_or((relative, ""));

    if main_href.starts_with('/') || has_scheme(main_href) {
        // If the path is absolute or has a scheme,
        // it is most likely resolved already.
        return Cow::Borrowed(relative);
    }

    let mut buf = Path::new(parent_dir).join(main_href);
    normalize_href_path(&mut buf);

    Cow::Owned(buf.to_string_lossy().into_owned() + frag)
}

/// The archive path `href` designates, used as the lookup key of a resource.
///
/// The key is resolved against `parent_dir`, percent-decoded,
/// uses forward slashes only and never starts with `/`.
/// Any fragment must be removed beforehand.
pub(crate) fn into_key(parent_dir: &str, href: &str) -> String {
    if href.is_empty() {
        return String::new();
    }
    let href = href.replace('\\', "/");
    let decoded = decode(&href);
    let resolved = if decoded.starts_with('/') {
        normalize(&decoded)
    } else {
        let mut buf = Path::new(parent_dir).join(decoded.as_ref());
        normalize_href_path(&mut buf);
        buf.to_string_lossy().replace('\\', "/")
    };

    match resolved.strip_prefix('/') {
        Some(stripped) => stripped.to_owned(),
        None => resolved,
    }
}

/// The path of `target` relative to the directory `base_dir`.
///
/// Both arguments are archive keys (see [`into_key`]).
pub(crate) fn relativize(base_dir: &str, target: &str) -> String {
    let base = base_dir
        .split('/')
        .filter(|component| !component.is_empty())
        .collect::<Vec<_>>();
    let target = target.split('/').collect::<Vec<_>>();

    // The file name itself is never part of the shared prefix
    let shared = base
        .iter()
        .zip(&target)
        .take_while(|(a, b)| a == b)
        .count()
        .min(target.len().saturating_sub(1));

    let mut relative = "../".repeat(base.len() - shared);
    relative.push_str(&target[shared..].join("/"));
    relative
}

fn normalize_href_path(original: &mut PathBuf) {
    let mut stack = Vec::new();

    for component in original.components() {
        match component {
            Component::ParentDir => {
                if stack
                    .last()
                    // If the component is the root, disallow popping.
                    // No content must come before the root when present.
                    .is_some_and(|component| !matches!(component, Component::RootDir))
                {
                    stack.pop();
                }
            }
            Component::CurDir => {}
            _ => {
                stack.push(component);
            }
        }
    }

    // Most if not all, hrefs are not normalized
    *original = PathBuf::from_iter(stack);
}

/// The provided `href` must not contain a `fragment`
/// and `query` when passed to this method.
pub(crate) fn has_scheme(href: &str) -> bool {
    href.split('/').next().is_some_and(|first| first.contains(':'))
}
