//! Typed view of the domain settings in a namelist.
//!
//! Per-domain variables may be stored as bare scalars when `max_dom` is 1.
//! They are normalized here, once, into one [`Domain`] per grid.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use namelist_store::{Namelist, Value};
use projection::{MapProjection, ProjectionParams};
use wrf_common::{WrfError, WrfResult};

const SHARE: &str = "share";
const GEOGRID: &str = "geogrid";

/// One nested grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    /// 1-based id of the enclosing domain; not used for the outer domain.
    pub parent_id: i64,
    /// Parent cell size divided by this domain's cell size.
    pub grid_ratio: i64,
    /// 1-based parent column of this domain's lower-left grid point.
    pub i_start: i64,
    /// 1-based parent row of this domain's lower-left grid point.
    pub j_start: i64,
    /// West-east grid points, both edges included.
    pub e_we: i64,
    /// South-north grid points, both edges included.
    pub e_sn: i64,
    pub geog_data_res: String,
    pub start_date: String,
    pub end_date: String,
}

/// All domains of a run plus the outer grid's projection and spacing.
///
/// `domains[0]` is domain 1, the outer grid. `max_dom` is always
/// `domains.len()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    pub projection: ProjectionParams,
    /// Outer grid spacing west-east (meters)
    pub dx: f64,
    /// Outer grid spacing south-north (meters)
    pub dy: f64,
    pub domains: Vec<Domain>,
}

impl Configuration {
    /// Read the grid configuration from a namelist.
    pub fn from_namelist(namelist: &Namelist) -> WrfResult<Self> {
        let max_dom = namelist.i64(SHARE, "max_dom")?;
        if max_dom < 1 {
            return Err(WrfError::configuration(format!(
                "share:max_dom must be at least 1, got {}",
                max_dom
            )));
        }
        let n = max_dom as usize;

        let map_proj: MapProjection = namelist.string(GEOGRID, "map_proj")?.parse()?;
        let projection = ProjectionParams {
            map_proj,
            truelat1: namelist.f64(GEOGRID, "truelat1")?,
            truelat2: namelist.f64(GEOGRID, "truelat2")?,
            ref_lat: namelist.f64(GEOGRID, "ref_lat")?,
            ref_lon: namelist.f64(GEOGRID, "ref_lon")?,
        };

        let parent_id = namelist.i64_list(GEOGRID, "parent_id", n)?;
        let grid_ratio = namelist.i64_list(GEOGRID, "parent_grid_ratio", n)?;
        let i_start = namelist.i64_list(GEOGRID, "i_parent_start", n)?;
        let j_start = namelist.i64_list(GEOGRID, "j_parent_start", n)?;
        let e_we = namelist.i64_list(GEOGRID, "e_we", n)?;
        let e_sn = namelist.i64_list(GEOGRID, "e_sn", n)?;
        let geog_data_res = namelist.string_list(GEOGRID, "geog_data_res", n)?;
        let start_date = namelist.string_list(SHARE, "start_date", n)?;
        let end_date = namelist.string_list(SHARE, "end_date", n)?;

        let domains = (0..n)
            .map(|d| Domain {
                parent_id: parent_id[d],
                grid_ratio: grid_ratio[d],
                i_start: i_start[d],
                j_start: j_start[d],
                e_we: e_we[d],
                e_sn: e_sn[d],
                geog_data_res: geog_data_res[d].clone(),
                start_date: start_date[d].clone(),
                end_date: end_date[d].clone(),
            })
            .collect();

        let config = Self {
            projection,
            dx: namelist.f64(GEOGRID, "dx")?,
            dy: namelist.f64(GEOGRID, "dy")?,
            domains,
        };
        config.validate()?;

        debug!(max_dom = n, dx = config.dx, dy = config.dy, "Loaded grid configuration");
        Ok(config)
    }

    /// Write the domain lists and `max_dom` back into a namelist.
    ///
    /// Per-domain variables are always written as lists. Projection and
    /// outer grid spacing are left as they are, as are all other variables.
    pub fn apply_to(&self, namelist: &mut Namelist) {
        let domains = &self.domains;

        namelist.set(SHARE, "max_dom", Value::from(self.max_dom() as i64));
        namelist.set(SHARE, "start_date", string_list(domains, |d| d.start_date.as_str()));
        namelist.set(SHARE, "end_date", string_list(domains, |d| d.end_date.as_str()));

        namelist.set(GEOGRID, "parent_id", int_list(domains, |d| d.parent_id));
        namelist.set(GEOGRID, "parent_grid_ratio", int_list(domains, |d| d.grid_ratio));
        namelist.set(GEOGRID, "i_parent_start", int_list(domains, |d| d.i_start));
        namelist.set(GEOGRID, "j_parent_start", int_list(domains, |d| d.j_start));
        namelist.set(GEOGRID, "e_we", int_list(domains, |d| d.e_we));
        namelist.set(GEOGRID, "e_sn", int_list(domains, |d| d.e_sn));
        namelist.set(GEOGRID, "geog_data_res", string_list(domains, |d| d.geog_data_res.as_str()));

        info!(max_dom = self.max_dom(), "Updated namelist domain settings");
    }

    /// Number of domains.
    pub fn max_dom(&self) -> usize {
        self.domains.len()
    }

    /// Domain by 1-based id.
    pub fn domain(&self, id: i64) -> Option<&Domain> {
        if id < 1 {
            return None;
        }
        self.domains.get((id - 1) as usize)
    }

    /// Check the structural invariants of the domain list.
    pub fn validate(&self) -> WrfResult<()> {
        if self.domains.is_empty() {
            return Err(WrfError::configuration("configuration has no domains"));
        }
        for (name, spacing) in [("dx", self.dx), ("dy", self.dy)] {
            if !spacing.is_finite() || spacing <= 0.0 {
                return Err(WrfError::configuration(format!(
                    "geogrid:{} must be positive, got {}",
                    name, spacing
                )));
            }
        }

        for (d, domain) in self.domains.iter().enumerate() {
            let id = d + 1;
            if domain.e_we < 2 || domain.e_sn < 2 {
                return Err(WrfError::configuration(format!(
                    "domain {} needs at least 2 grid points per axis, has {} x {}",
                    id, domain.e_we, domain.e_sn
                )));
            }
            if domain.grid_ratio < 1 {
                return Err(WrfError::configuration(format!(
                    "domain {} has parent_grid_ratio {}",
                    id, domain.grid_ratio
                )));
            }
            if d == 0 {
                continue;
            }
            if domain.parent_id < 1 || domain.parent_id as usize >= id {
                return Err(WrfError::configuration(format!(
                    "domain {} has parent_id {}; parents must precede their nests",
                    id, domain.parent_id
                )));
            }
            if domain.i_start < 1 || domain.j_start < 1 {
                return Err(WrfError::configuration(format!(
                    "domain {} starts at parent index ({}, {}), indices are 1-based",
                    id, domain.i_start, domain.j_start
                )));
            }
        }
        Ok(())
    }
}

fn int_list(domains: &[Domain], f: impl Fn(&Domain) -> i64) -> Value {
    Value::Sequence(domains.iter().map(|d| Value::from(f(d))).collect())
}

fn string_list(domains: &[Domain], f: impl Fn(&Domain) -> &str) -> Value {
    Value::Sequence(domains.iter().map(|d| Value::from(f(d))).collect())
}
