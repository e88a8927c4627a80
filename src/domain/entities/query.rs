use std::collections::BTreeMap;
use std::fmt;

use crate::domain::entities::planet::Dimension;

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MIN_LIMIT: u32 = 1;
pub const MAX_LIMIT: u32 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn as_wire(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Sort columns understood by the paged (`page`/`pages`) backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CatalogSortField {
    #[default]
    DiscoveryYear,
    Name,
    OrbitalPeriod,
    Radius,
    Mass,
}

impl CatalogSortField {
    pub const ALL: [CatalogSortField; 5] = [
        CatalogSortField::DiscoveryYear,
        CatalogSortField::Name,
        CatalogSortField::OrbitalPeriod,
        CatalogSortField::Radius,
        CatalogSortField::Mass,
    ];

    pub fn as_wire(self) -> &'static str {
        match self {
            CatalogSortField::DiscoveryYear => "discovery_year",
            CatalogSortField::Name => "name",
            CatalogSortField::OrbitalPeriod => "orbital_period",
            CatalogSortField::Radius => "radius",
            CatalogSortField::Mass => "mass",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CatalogSortField::DiscoveryYear => "Discovery year",
            CatalogSortField::Name => "Name",
            CatalogSortField::OrbitalPeriod => "Orbital period",
            CatalogSortField::Radius => "Radius",
            CatalogSortField::Mass => "Mass",
        }
    }

    pub fn from_wire(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_wire() == value)
    }
}

/// Sort columns understood by the offset (`limit`/`offset`) backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExplorerSortField {
    #[default]
    Id,
    Name,
    Dimension(Dimension),
}

impl ExplorerSortField {
    pub fn all() -> Vec<ExplorerSortField> {
        let mut fields = vec![ExplorerSortField::Id, ExplorerSortField::Name];
        fields.extend(Dimension::all().map(ExplorerSortField::Dimension));
        fields
    }

    pub fn as_wire(self) -> &'static str {
        match self {
            ExplorerSortField::Id => "id",
            ExplorerSortField::Name => "name",
            ExplorerSortField::Dimension(dimension) => dimension.wire(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ExplorerSortField::Id => "Newest",
            ExplorerSortField::Name => "Name",
            ExplorerSortField::Dimension(dimension) => dimension.label(),
        }
    }

    pub fn from_wire(value: &str) -> Option<Self> {
        Self::all().into_iter().find(|field| field.as_wire() == value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CatalogField {
    Name,
    Method,
    MinYear,
    MaxYear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExplorerField {
    Name,
    DiscMethod,
    Min(Dimension),
    Max(Dimension),
}

/// Raw, unvalidated user input keyed by field. Parsing happens when the
/// query is built so a half-typed number never blocks editing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInputs<F: Ord> {
    values: BTreeMap<F, String>,
}

impl<F: Ord> Default for FieldInputs<F> {
    fn default() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }
}

impl<F: Ord + Copy> FieldInputs<F> {
    pub fn get(&self, field: F) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, field: F, value: impl Into<String>) {
        let value = value.into();
        if value.is_empty() {
            self.values.remove(&field);
        } else {
            self.values.insert(field, value);
        }
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CatalogFilters {
    pub inputs: FieldInputs<CatalogField>,
    pub sort_by: CatalogSortField,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExplorerFilters {
    pub inputs: FieldInputs<ExplorerField>,
    pub include_deleted: bool,
    pub sort_by: ExplorerSortField,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageWindow {
    page: u32,
    page_size: u32,
}

impl Default for PageWindow {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }
}

impl PageWindow {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.clamp(MIN_LIMIT, MAX_LIMIT),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn first(self) -> Self {
        Self::new(1, self.page_size)
    }

    pub fn with_page(self, page: u32) -> Self {
        Self::new(page, self.page_size)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OffsetWindow {
    limit: u32,
    offset: u64,
}

impl Default for OffsetWindow {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, 0)
    }
}

impl OffsetWindow {
    pub fn new(limit: u32, offset: u64) -> Self {
        Self {
            limit: limit.clamp(MIN_LIMIT, MAX_LIMIT),
            offset,
        }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn first(self) -> Self {
        Self::new(self.limit, 0)
    }

    pub fn next(self) -> Self {
        Self::new(self.limit, self.offset + u64::from(self.limit))
    }

    pub fn previous(self) -> Self {
        Self::new(self.limit, self.offset.saturating_sub(u64::from(self.limit)))
    }
}

/// Filter, sort and page state behind the Catalog view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CatalogQuery {
    pub filters: CatalogFilters,
    pub window: PageWindow,
}

impl CatalogQuery {
    pub fn set_filter(&mut self, field: CatalogField, value: impl Into<String>) {
        self.filters.inputs.set(field, value);
        self.window = self.window.first();
    }

    pub fn set_sort(&mut self, sort_by: CatalogSortField) {
        self.filters.sort_by = sort_by;
        self.window = self.window.first();
    }

    pub fn toggle_direction(&mut self) {
        self.filters.direction = self.filters.direction.toggled();
        self.window = self.window.first();
    }

    pub fn set_page_size(&mut self, page_size: u32) {
        self.window = PageWindow::new(1, page_size);
    }

    pub fn go_to_page(&mut self, page: u32) {
        self.window = self.window.with_page(page);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Filter, sort and offset state behind the Explorer view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExplorerQuery {
    pub filters: ExplorerFilters,
    pub window: OffsetWindow,
}

impl ExplorerQuery {
    pub fn set_filter(&mut self, field: ExplorerField, value: impl Into<String>) {
        self.filters.inputs.set(field, value);
        self.window = self.window.first();
    }

    pub fn set_include_deleted(&mut self, include_deleted: bool) {
        self.filters.include_deleted = include_deleted;
        self.window = self.window.first();
    }

    pub fn set_sort(&mut self, sort_by: ExplorerSortField) {
        self.filters.sort_by = sort_by;
        self.window = self.window.first();
    }

    pub fn toggle_direction(&mut self) {
        self.filters.direction = self.filters.direction.toggled();
        self.window = self.window.first();
    }

    pub fn set_limit(&mut self, limit: u32) {
        self.window = OffsetWindow::new(limit, 0);
    }

    pub fn next_page(&mut self) {
        self.window = self.window.next();
    }

    pub fn previous_page(&mut self) {
        self.window = self.window.previous();
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl ParamValue {
    /// Empty text means "unset" and never reaches the query string.
    pub fn is_omitted(&self) -> bool {
        matches!(self, ParamValue::Text(text) if text.is_empty())
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Text(text) => f.write_str(text),
            ParamValue::Int(value) => write!(f, "{value}"),
            ParamValue::Float(value) => write!(f, "{value}"),
            ParamValue::Bool(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        ParamValue::Int(i64::from(value))
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

/// Wire parameters in emission order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryParams {
    entries: Vec<(&'static str, ParamValue)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: &'static str, value: impl Into<ParamValue>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn set_opt(&mut self, name: &'static str, value: Option<ParamValue>) {
        if let Some(value) = value {
            self.set(name, value);
        }
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.entries
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Name/value pairs that belong on the query string.
    pub fn pairs(&self) -> impl Iterator<Item = (&'static str, String)> + '_ {
        self.entries
            .iter()
            .filter(|(_, value)| !value.is_omitted())
            .map(|(name, value)| (*name, value.to_string()))
    }
}

/// Identity of one request. Parameters are kept sorted so two states that
/// build the same wire parameters share a key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryKey {
    origin: String,
    path: String,
    params: BTreeMap<String, String>,
}

impl QueryKey {
    pub fn new(origin: impl Into<String>, path: impl Into<String>, params: &QueryParams) -> Self {
        Self {
            origin: origin.into(),
            path: path.into(),
            params: params
                .pairs()
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
        }
    }

}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.origin, self.path)?;
        let mut separator = '?';
        for (name, value) in &self.params {
            write!(f, "{separator}{name}={value}")?;
            separator = '&';
        }
        Ok(())
    }
}
