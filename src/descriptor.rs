//! Palette descriptor strings.
//!
//! A descriptor is a base palette name with optional suffix tokens:
//!
//! ```text
//! <base>[_n<count>][_r][_i<index-spec>]
//! ```
//!
//! * `_n<count>` resamples the base palette to `count` samples.
//! * `_r` (or `_rr...`) reverses the sample order.
//! * `_i<spec>` keeps a subset: one index (`_i3`), a list (`_i0,4,-1`) or a
//!   slice (`_i2:10`, `_i::2`, `_i-5:`).
//!
//! Tokens may appear in any order on input. They are extracted one kind at a
//! time (count, then reverse, then index), each pass working on what the
//! previous pass left behind. Encoding always writes them as n, r, i.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::error::{HuecraftError, Result};

static COUNT_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"_n\d+").expect("valid regex"));
static REVERSE_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"_r+").expect("valid regex"));
static INDEX_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"_i(-?\d*(?:,-?\d+)*(?::-?\d*)?(?::-?\d+)?)").expect("valid regex")
});

/// Which samples a subset keeps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexSpec {
    /// One position; widened to a two-sample palette
    Single(i64),
    /// Explicit positions, output in the listed order
    List(Vec<i64>),
    /// A `start:stop:step` range with sequence-slice semantics
    Slice(SliceSpec),
}

/// A slice with optional bounds and step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SliceSpec {
    pub start: Option<i64>,
    pub stop: Option<i64>,
    pub step: Option<i64>,
}

impl SliceSpec {
    pub fn new(start: Option<i64>, stop: Option<i64>, step: Option<i64>) -> Self {
        Self { start, stop, step }
    }

    /// The full range walked backwards, i.e. `::-1`
    pub fn reversed() -> Self {
        Self::new(None, None, Some(-1))
    }

    pub fn is_full_reversal(&self) -> bool {
        self.start.is_none() && self.stop.is_none() && self.step == Some(-1)
    }

    /// Positions selected over a sequence of `len` items.
    ///
    /// Bounds past either end are clamped rather than rejected; only a zero
    /// step is an error.
    pub fn indices(&self, len: usize) -> Result<Vec<usize>> {
        let step = self.step.unwrap_or(1);
        if step == 0 {
            return Err(HuecraftError::out_of_range("slice step cannot be zero"));
        }

        let len = len as i64;
        let (lower, upper) = if step < 0 { (-1, len - 1) } else { (0, len) };
        let clamp = |bound: i64| {
            if bound < 0 {
                (bound + len).max(lower)
            } else {
                bound.min(upper)
            }
        };

        let start = match self.start {
            Some(bound) => clamp(bound),
            None if step < 0 => upper,
            None => lower,
        };
        let stop = match self.stop {
            Some(bound) => clamp(bound),
            None if step < 0 => lower,
            None => upper,
        };

        let mut indices = Vec::new();
        let mut i = start;
        while (step > 0 && i < stop) || (step < 0 && i > stop) {
            indices.push(i as usize);
            i += step;
        }
        Ok(indices)
    }
}

impl fmt::Display for SliceSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let part = |bound: Option<i64>| bound.map(|b| b.to_string()).unwrap_or_default();
        write!(f, "{}:{}", part(self.start), part(self.stop))?;
        if let Some(step) = self.step {
            write!(f, ":{step}")?;
        }
        Ok(())
    }
}

impl fmt::Display for IndexSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexSpec::Single(index) => write!(f, "{index}"),
            IndexSpec::List(indices) => {
                let joined: Vec<String> = indices.iter().map(|i| i.to_string()).collect();
                f.write_str(&joined.join(","))
            }
            IndexSpec::Slice(slice) => write!(f, "{slice}"),
        }
    }
}

impl FromStr for IndexSpec {
    type Err = HuecraftError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let malformed = || HuecraftError::MalformedName {
            key: "_i".to_string(),
            matches: vec![s.to_string()],
        };
        let int = |part: &str| part.parse::<i64>().map_err(|_| malformed());
        let bound = |part: &str| {
            if part.is_empty() {
                Ok(None)
            } else {
                int(part).map(Some)
            }
        };

        if s.contains(',') {
            let indices = s.split(',').map(int).collect::<Result<Vec<i64>>>()?;
            Ok(IndexSpec::List(indices))
        } else if s.contains(':') {
            let parts: Vec<&str> = s.splitn(3, ':').collect();
            Ok(IndexSpec::Slice(SliceSpec::new(
                bound(parts[0])?,
                bound(parts.get(1).copied().unwrap_or(""))?,
                bound(parts.get(2).copied().unwrap_or(""))?,
            )))
        } else {
            int(s).map(IndexSpec::Single)
        }
    }
}

impl From<SliceSpec> for IndexSpec {
    fn from(slice: SliceSpec) -> Self {
        IndexSpec::Slice(slice)
    }
}

impl From<i64> for IndexSpec {
    fn from(index: i64) -> Self {
        IndexSpec::Single(index)
    }
}

impl From<Vec<i64>> for IndexSpec {
    fn from(indices: Vec<i64>) -> Self {
        IndexSpec::List(indices)
    }
}

/// A descriptor string split into its base name and transform parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    pub base: String,
    pub num_colors: Option<usize>,
    pub reverse: bool,
    pub index: Option<IndexSpec>,
}

impl Descriptor {
    /// A descriptor for `base` with no transforms
    pub fn plain(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            num_colors: None,
            reverse: false,
            index: None,
        }
    }

    /// Split a descriptor string into base name and tokens
    pub fn parse(descriptor: &str) -> Result<Self> {
        let (residual, count) = extract_token(&COUNT_TOKEN, descriptor, "_n")?;
        let (residual, reverse) = extract_token(&REVERSE_TOKEN, &residual, "_r")?;
        let (base, index) = extract_token(&INDEX_TOKEN, &residual, "_i")?;

        let num_colors = count
            .map(|token| {
                token[2..].parse::<usize>().map_err(|_| {
                    HuecraftError::out_of_range(format!("sample count in '{token}' is too large"))
                })
            })
            .transpose()?;
        let index = index
            .as_deref()
            .map(|token| token[2..].parse::<IndexSpec>())
            .transpose()?;

        let parsed = Self {
            base,
            num_colors,
            reverse: reverse.is_some(),
            index,
        };
        debug!(
            descriptor = descriptor,
            base = %parsed.base,
            num_colors = ?parsed.num_colors,
            reverse = parsed.reverse,
            index = ?parsed.index.as_ref().map(|i| i.to_string()),
            "Parsed palette descriptor"
        );
        Ok(parsed)
    }

    /// The base name with the count and reverse tokens, without the index
    pub fn name_before_subset(&self) -> String {
        let mut name = self.base.clone();
        if let Some(n) = self.num_colors {
            name.push_str(&format!("_n{n}"));
        }
        if self.reverse {
            name.push_str("_r");
        }
        name
    }

    /// Canonical string form: base, then `_n`, `_r`, `_i`
    pub fn encode(&self) -> String {
        match &self.index {
            Some(index) => encode_subset(&self.name_before_subset(), index),
            None => self.name_before_subset(),
        }
    }
}

impl FromStr for Descriptor {
    type Err = HuecraftError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Descriptor::parse(s)
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

/// Find every token of one kind and remove the first.
///
/// A token only counts when followed by `_` or the end of the string, so
/// `_n12` is never read out of `_n12x`. An index token must also carry a
/// non-empty spec. More than one token of the kind is a malformed name.
fn extract_token(pattern: &Regex, string: &str, key: &str) -> Result<(String, Option<String>)> {
    let matches: Vec<regex::Match<'_>> = pattern
        .find_iter(string)
        .filter(|m| m.end() == string.len() || string[m.end()..].starts_with('_'))
        .filter(|m| key != "_i" || m.len() > key.len())
        .collect();

    match matches.as_slice() {
        [] => Ok((string.to_string(), None)),
        [token] => {
            let residual = format!("{}{}", &string[..token.start()], &string[token.end()..]);
            Ok((residual, Some(token.as_str().to_string())))
        }
        _ => Err(HuecraftError::MalformedName {
            key: key.to_string(),
            matches: matches.iter().map(|m| m.as_str().to_string()).collect(),
        }),
    }
}

/// Whether `name` already carries a reverse token
pub fn has_reverse_token(name: &str) -> bool {
    REVERSE_TOKEN
        .find_iter(name)
        .any(|m| m.end() == name.len() || name[m.end()..].starts_with('_'))
}

/// Name for a reversed palette; the `_r` token is appended once at most.
pub fn encode_reverse(name: &str) -> String {
    if has_reverse_token(name) {
        name.to_string()
    } else {
        format!("{name}_r")
    }
}

/// Name for a subset of the palette called `name`.
pub fn encode_subset(name: &str, index: &IndexSpec) -> String {
    match index {
        IndexSpec::Slice(slice) if slice.is_full_reversal() => encode_reverse(name),
        _ => format!("{name}_i{index}"),
    }
}
