use crate::domain::entities::planet::{ChartRequest, Dimension};
use crate::domain::entities::query::{
    CatalogField, CatalogQuery, ExplorerField, ExplorerFilters, ExplorerQuery, FieldInputs,
    ParamValue, QueryParams,
};
use crate::usecase::ports::catalog::PLANETS_PATH;

/// When a raw input is left off the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OmitRule {
    /// Omit if empty after trimming.
    Blank,
    /// Omit unless it parses as an integer.
    NotInteger,
    /// Omit unless it parses as a finite number.
    NotNumber,
}

impl OmitRule {
    pub fn apply(self, raw: &str) -> Option<ParamValue> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        match self {
            OmitRule::Blank => Some(ParamValue::Text(trimmed.to_string())),
            OmitRule::NotInteger => trimmed.parse::<i64>().ok().map(ParamValue::Int),
            OmitRule::NotNumber => trimmed
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .map(ParamValue::Float),
        }
    }
}

pub struct ParamSpec<F: 'static> {
    pub field: F,
    pub wire: &'static str,
    pub omit: OmitRule,
}

pub static CATALOG_FILTER_PARAMS: [ParamSpec<CatalogField>; 4] = [
    ParamSpec {
        field: CatalogField::Name,
        wire: "name",
        omit: OmitRule::Blank,
    },
    ParamSpec {
        field: CatalogField::Method,
        wire: "method",
        omit: OmitRule::Blank,
    },
    ParamSpec {
        field: CatalogField::MinYear,
        wire: "min_year",
        omit: OmitRule::NotInteger,
    },
    ParamSpec {
        field: CatalogField::MaxYear,
        wire: "max_year",
        omit: OmitRule::NotInteger,
    },
];

pub static EXPLORER_TEXT_PARAMS: [ParamSpec<ExplorerField>; 2] = [
    ParamSpec {
        field: ExplorerField::Name,
        wire: "name",
        omit: OmitRule::Blank,
    },
    ParamSpec {
        field: ExplorerField::DiscMethod,
        wire: "disc_method",
        omit: OmitRule::Blank,
    },
];

macro_rules! range_params {
    ($($dimension:ident => $min:literal, $max:literal, $omit:ident;)*) => {
        [$(
            ParamSpec {
                field: ExplorerField::Min(Dimension::$dimension),
                wire: $min,
                omit: OmitRule::$omit,
            },
            ParamSpec {
                field: ExplorerField::Max(Dimension::$dimension),
                wire: $max,
                omit: OmitRule::$omit,
            },
        )*]
    };
}

pub static EXPLORER_RANGE_PARAMS: [ParamSpec<ExplorerField>; 14] = range_params! {
    DiscYear => "min_disc_year", "max_disc_year", NotInteger;
    OrbitalPeriod => "min_orbperd", "max_orbperd", NotNumber;
    Radius => "min_rade", "max_rade", NotNumber;
    Mass => "min_masse", "max_masse", NotNumber;
    StarTemperature => "min_st_teff", "max_st_teff", NotNumber;
    StarRadius => "min_st_rad", "max_st_rad", NotNumber;
    StarMass => "min_st_mass", "max_st_mass", NotNumber;
};

fn apply_table<F: Ord + Copy>(
    params: &mut QueryParams,
    table: &'static [ParamSpec<F>],
    inputs: &FieldInputs<F>,
) {
    for spec in table {
        params.set_opt(spec.wire, spec.omit.apply(inputs.get(spec.field)));
    }
}

/// Maps query state to one backend's wire parameters.
pub trait QueryBuilder {
    type Query;

    const PATH: &'static str;

    fn build(query: &Self::Query) -> QueryParams;
}

/// `GET /planets?limit&page&...` answered with `{results, page, pages, total}`.
pub struct PagedContract;

/// `GET /planets?limit&offset&...` answered with `{items, limit, offset, total}`.
pub struct OffsetContract;

impl QueryBuilder for PagedContract {
    type Query = CatalogQuery;

    const PATH: &'static str = PLANETS_PATH;

    fn build(query: &CatalogQuery) -> QueryParams {
        let mut params = QueryParams::new();
        params.set("limit", query.window.page_size());
        params.set("page", query.window.page());
        apply_table(&mut params, &CATALOG_FILTER_PARAMS, &query.filters.inputs);
        params.set("order_by", query.filters.sort_by.as_wire());
        params.set("order_dir", query.filters.direction.as_wire());
        params
    }
}

impl QueryBuilder for OffsetContract {
    type Query = ExplorerQuery;

    const PATH: &'static str = PLANETS_PATH;

    fn build(query: &ExplorerQuery) -> QueryParams {
        let mut params = QueryParams::new();
        params.set("limit", query.window.limit());
        params.set("offset", ParamValue::Int(offset_as_i64(query.window.offset())));
        apply_table(&mut params, &EXPLORER_TEXT_PARAMS, &query.filters.inputs);
        if query.filters.include_deleted {
            params.set("include_deleted", true);
        }
        params.set("sort_by", query.filters.sort_by.as_wire());
        params.set("sort_order", query.filters.direction.as_wire());
        apply_table(&mut params, &EXPLORER_RANGE_PARAMS, &query.filters.inputs);
        params
    }
}

fn offset_as_i64(offset: u64) -> i64 {
    i64::try_from(offset).unwrap_or(i64::MAX)
}

/// Filter subset shared by the listing and the aggregate statistics.
pub fn build_explorer_filter_params(filters: &ExplorerFilters) -> QueryParams {
    let mut params = QueryParams::new();
    apply_table(&mut params, &EXPLORER_TEXT_PARAMS, &filters.inputs);
    if filters.include_deleted {
        params.set("include_deleted", true);
    }
    apply_table(&mut params, &EXPLORER_RANGE_PARAMS, &filters.inputs);
    params
}

pub fn build_chart_params(request: &ChartRequest) -> QueryParams {
    let request = ChartRequest::new(request.kind, request.bins, request.sigma);
    let mut params = QueryParams::new();
    params.set("chart", request.kind.as_wire());
    params.set("bins", request.bins);
    params.set("sigma", request.sigma);
    params
}
