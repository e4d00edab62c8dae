//! Symbol naming: rank → short name via bijective base-N numbering.

use std::sync::LazyLock;

use regex::Regex;

static RE_RESERVED: LazyLock<Regex> = LazyLock::new(|| Regex::new(
    "^(?:do|if|in|for|int|let|new|try|var|byte|case|char|else|enum|goto|long|this|void|with|await|break|catch|class|const|final|float|short|super|throw|while|yield|delete|double|export|import|native|return|switch|throws|typeof|boolean|default|extends|finally|package|private|abstract|continue|debugger|function|volatile|interface|protected|transient|implements|instanceof|synchronized)$"
).unwrap());
static RE_IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap());

/// Name for `rank` over `alphabet`. Every rank gets a distinct name and
/// there is no zero digit, so "a" and "aa" are both reachable.
///
/// Panics on an empty alphabet.
pub fn symbol_name(rank: usize, alphabet: &[char]) -> String {
    let base = alphabet.len();
    let mut n = rank;
    let mut digits = Vec::new();
    loop {
        digits.push(alphabet[n % base]);
        if n < base {
            break;
        }
        n = n / base - 1;
    }
    digits.iter().rev().collect()
}

pub fn is_reserved(name: &str) -> bool {
    RE_RESERVED.is_match(name)
}

/// A plain ASCII script identifier that is not a reserved word.
pub fn is_identifier(name: &str) -> bool {
    RE_IDENTIFIER.is_match(name) && !is_reserved(name)
}

/// Name for `rank`, suffixed with underscores until it is neither reserved
/// nor `taken`.
pub fn allocate<F>(rank: usize, alphabet: &[char], taken: F) -> String
where
    F: Fn(&str) -> bool,
{
    let mut name = symbol_name(rank, alphabet);
    while taken(&name) || is_reserved(&name) {
        name.push('_');
    }
    name
}

/// Alphabets must be non-empty, free of duplicates and free of `_`, which
/// is reserved for collision suffixes.
pub fn validate_alphabet(alphabet: &[char]) -> anyhow::Result<()> {
    if alphabet.is_empty() {
        anyhow::bail!("symbol alphabet is empty");
    }
    if alphabet.contains(&'_') {
        anyhow::bail!("symbol alphabet must not contain '_'");
    }
    let mut seen = std::collections::HashSet::new();
    if let Some(dup) = alphabet.iter().find(|c| !seen.insert(**c)) {
        anyhow::bail!("symbol alphabet repeats {dup:?}");
    }
    Ok(())
}
