use {
    crate::error::ViewError,
    serde::{Deserialize, Serialize},
    serde_json::{Number, Value},
    std::{borrow::Cow, cmp::Ordering, fmt, str::FromStr, sync::Arc},
};

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

pub type Comparator<T> = Arc<dyn Fn(&T, &T) -> Ordering + Send + Sync>;

/// How a view orders its filtered contents.
pub enum SortSpec<T> {
    Unsorted,
    /// contents arrive already ordered
    Presorted,
    By(Comparator<T>),
}

impl<T: Resolve + 'static> SortSpec<T> {
    /// Comparator over `keys`; no keys means no sorting.
    pub fn from_keys(keys: &[SortKey]) -> Self {
        if keys.is_empty() {
            SortSpec::Unsorted
        } else {
            SortSpec::By(build_comparator(keys))
        }
    }
}

impl<T> SortSpec<T> {
    /// Stable in-place sort; ties keep their relative order.
    pub fn apply(&self, items: &mut [T]) {
        if let SortSpec::By(cmp) = self {
            items.sort_by(|a, b| cmp(a, b));
        }
    }
}

impl<T> Clone for SortSpec<T> {
    fn clone(&self) -> Self {
        match self {
            SortSpec::Unsorted => SortSpec::Unsorted,
            SortSpec::Presorted => SortSpec::Presorted,
            SortSpec::By(cmp) => SortSpec::By(cmp.clone()),
        }
    }
}

impl<T> Default for SortSpec<T> {
    fn default() -> Self {
        SortSpec::Unsorted
    }
}

                    /*\
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                 Sort Keys
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                    \*/

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    pub fn apply(self, ord: Ordering) -> Ordering {
        match self {
            Direction::Asc => ord,
            Direction::Desc => ord.reverse(),
        }
    }
}

impl FromStr for Direction {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Direction::Asc),
            "desc" => Ok(Direction::Desc),
            other => Err(ViewError::UnknownDirection(other.to_string())),
        }
    }
}

/// Dotted path into a structured item, e.g. `author.name`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct FieldPath(Vec<String>);

impl FieldPath {
    pub fn segments(&self) -> &[String] {
        &self.0
    }
}

impl From<&str> for FieldPath {
    fn from(path: &str) -> Self {
        FieldPath(path.split('.').map(str::to_string).collect())
    }
}

impl From<String> for FieldPath {
    fn from(path: String) -> Self {
        FieldPath::from(path.as_str())
    }
}

impl From<FieldPath> for String {
    fn from(path: FieldPath) -> Self {
        path.to_string()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub path: FieldPath,
    #[serde(default)]
    pub direction: Direction,
}

impl SortKey {
    pub fn new(path: impl Into<FieldPath>, direction: Direction) -> Self {
        SortKey {
            path: path.into(),
            direction,
        }
    }

    pub fn asc(path: impl Into<FieldPath>) -> Self {
        SortKey::new(path, Direction::Asc)
    }

    pub fn desc(path: impl Into<FieldPath>) -> Self {
        SortKey::new(path, Direction::Desc)
    }
}

impl From<&str> for SortKey {
    fn from(path: &str) -> Self {
        SortKey::asc(path)
    }
}

impl From<String> for SortKey {
    fn from(path: String) -> Self {
        SortKey::asc(path)
    }
}

impl From<(&str, Direction)> for SortKey {
    fn from((path, direction): (&str, Direction)) -> Self {
        SortKey::new(path, direction)
    }
}

impl TryFrom<(&str, &str)> for SortKey {
    type Error = ViewError;

    fn try_from((path, direction): (&str, &str)) -> Result<Self, Self::Error> {
        Ok(SortKey::new(path, direction.parse()?))
    }
}

/// `path` or `path asc|desc`
impl FromStr for SortKey {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_whitespace().collect::<Vec<_>>().as_slice() {
            [path] => Ok(SortKey::asc(*path)),
            [path, direction] => SortKey::try_from((*path, *direction)),
            _ => Err(ViewError::InvalidSortKey(s.to_string())),
        }
    }
}

/// Reads loose sort arguments: each one a `SortKey` string, or exactly one
/// field path followed by a bare `asc` / `desc`.
pub fn parse_sort_args(args: &[&str]) -> Result<Vec<SortKey>, ViewError> {
    match args {
        [path, dir @ ("asc" | "desc")] => Ok(vec![SortKey::try_from((*path, *dir))?]),
        _ => args.iter().map(|arg| arg.parse()).collect(),
    }
}

                    /*\
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                 Resolve
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                    \*/

/// Field lookup for sort keys.
///
/// A missing field anywhere along the path, or a null, resolves to `None`.
pub trait Resolve {
    fn resolve(&self, path: &FieldPath) -> Option<Cow<'_, Value>>;
}

impl Resolve for Value {
    fn resolve(&self, path: &FieldPath) -> Option<Cow<'_, Value>> {
        let mut cur = self;
        let mut segments = path.segments().iter().peekable();

        while let Some(seg) = segments.next() {
            cur = match cur {
                Value::Object(fields) => fields.get(seg)?,
                Value::Array(elems) if seg == "length" => {
                    return length_of(elems.len(), segments.peek().is_none());
                }
                Value::Array(elems) => elems.get(seg.parse::<usize>().ok()?)?,
                Value::String(s) if seg == "length" => {
                    return length_of(s.chars().count(), segments.peek().is_none());
                }
                _ => return None,
            };
        }

        if cur.is_null() {
            None
        } else {
            Some(Cow::Borrowed(cur))
        }
    }
}

fn length_of<'a>(len: usize, last: bool) -> Option<Cow<'a, Value>> {
    // numbers have no fields
    if last {
        Some(Cow::Owned(Value::from(len)))
    } else {
        None
    }
}

                    /*\
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
              Comparator Builder
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                    \*/

type Accessor<T> = Box<dyn for<'a> Fn(&'a T) -> Option<Cow<'a, Value>> + Send + Sync>;

fn accessor<T: Resolve>(path: FieldPath) -> impl for<'a> Fn(&'a T) -> Option<Cow<'a, Value>> + Send + Sync {
    move |item| item.resolve(&path)
}

/// Compiles `keys` into one comparator.
///
/// Keys are tried in order until one tells the items apart. A null sorts
/// below every non-null value; `Desc` reverses the whole ordering, nulls
/// included. Values of different kinds compare equal.
pub fn build_comparator<T>(keys: &[SortKey]) -> Comparator<T>
where
    T: Resolve + 'static,
{
    let getters: Vec<(Accessor<T>, Direction)> = keys
        .iter()
        .map(|key| {
            let getter: Accessor<T> = Box::new(accessor::<T>(key.path.clone()));
            (getter, key.direction)
        })
        .collect();

    Arc::new(move |a: &T, b: &T| {
        for (getter, direction) in getters.iter() {
            let ord = compare_resolved(getter(a).as_deref(), getter(b).as_deref());
            if ord != Ordering::Equal {
                return direction.apply(ord);
            }
        }
        Ordering::Equal
    })
}

pub fn compare_resolved(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => match (a, b) {
            (Value::Number(x), Value::Number(y)) => compare_numbers(x, y),
            (Value::String(x), Value::String(y)) => x.cmp(y),
            (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
            _ => Ordering::Equal,
        },
    }
}

/// Integers compare exactly; `f64` only once a float is involved.
fn compare_numbers(x: &Number, y: &Number) -> Ordering {
    if let (Some(x), Some(y)) = (x.as_i64(), y.as_i64()) {
        return x.cmp(&y);
    }
    if let (Some(x), Some(y)) = (x.as_u64(), y.as_u64()) {
        return x.cmp(&y);
    }
    match (x.as_f64(), y.as_f64()) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => Ordering::Equal,
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
