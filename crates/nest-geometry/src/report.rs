//! Per-domain summary of a grid configuration.

use std::fmt;

use serde::Serialize;

use wrf_common::{WrfDateTime, WrfResult};

use crate::config::Configuration;
use crate::extent::compute_extents;

/// A (north-south, west-east) pair, printed in that order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLonPair {
    pub ns: f64,
    pub we: f64,
}

/// Location and size of one domain in grid, projected and geographic terms.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomainReport {
    pub id: usize,
    pub parent_id: i64,
    /// Parent indices of the first grid point.
    pub parent_start: (f64, f64),
    /// Parent indices of the last grid point.
    pub parent_end: (f64, f64),
    pub dx: f64,
    pub dy: f64,
    pub e_we: i64,
    pub e_sn: i64,
    pub nw_km: LatLonPair,
    pub se_km: LatLonPair,
    pub center_km: LatLonPair,
    pub extent_km: (f64, f64),
    pub nw_deg: LatLonPair,
    pub se_deg: LatLonPair,
    pub center_deg: LatLonPair,
    pub extent_deg: LatLonPair,
    pub start_date: String,
    pub end_date: String,
    /// Simulation length, when both dates parse.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_hours: Option<i64>,
}

/// Build a report for every domain, in domain order.
pub fn domain_reports(config: &Configuration) -> WrfResult<Vec<DomainReport>> {
    let extents = compute_extents(config)?;

    let reports = config
        .domains
        .iter()
        .zip(&extents.domains)
        .enumerate()
        .map(|(d, (domain, extent))| {
            // The outer domain has no parent grid to be refined from.
            let ratio = if d == 0 { 1.0 } else { domain.grid_ratio as f64 };
            let (west, east) = (extent.west(), extent.east());
            let (south, north) = (extent.south(), extent.north());
            let (center_x, center_y) = extent.bounds.center();

            let (w, n) = extents.to_geographic(west, north);
            let (e, s) = extents.to_geographic(east, south);
            let (clon, clat) = extents.to_geographic(center_x, center_y);

            let run_hours = match (
                WrfDateTime::parse(&domain.start_date),
                WrfDateTime::parse(&domain.end_date),
            ) {
                (Ok(start), Ok(end)) => Some(start.until(&end).num_hours()),
                _ => None,
            };

            DomainReport {
                id: d + 1,
                parent_id: domain.parent_id,
                parent_start: (domain.i_start as f64, domain.j_start as f64),
                parent_end: (
                    domain.i_start as f64 + (domain.e_we - 1) as f64 / ratio,
                    domain.j_start as f64 + (domain.e_sn - 1) as f64 / ratio,
                ),
                dx: extent.dx,
                dy: extent.dy,
                e_we: domain.e_we,
                e_sn: domain.e_sn,
                nw_km: LatLonPair { ns: north * 0.001, we: west * 0.001 },
                se_km: LatLonPair { ns: south * 0.001, we: east * 0.001 },
                center_km: LatLonPair { ns: center_y * 0.001, we: center_x * 0.001 },
                extent_km: (extent.bounds.width() * 0.001, extent.bounds.height() * 0.001),
                nw_deg: LatLonPair { ns: n, we: w },
                se_deg: LatLonPair { ns: s, we: e },
                center_deg: LatLonPair { ns: clat, we: clon },
                extent_deg: LatLonPair { ns: n - s, we: e - w },
                start_date: domain.start_date.clone(),
                end_date: domain.end_date.clone(),
                run_hours,
            }
        })
        .collect();

    Ok(reports)
}

impl fmt::Display for DomainReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--------------- Domain {:2} ({:2}) ---------------", self.id, self.parent_id)?;
        writeln!(f, "Parent start     {:>12.0} {:>12.0}", self.parent_start.0, self.parent_start.1)?;
        writeln!(f, "Parent end       {:>12.0} {:>12.0}", self.parent_end.0, self.parent_end.1)?;
        writeln!(f, "dx dy     m      {:>12.0} {:>12.0}", self.dx, self.dy)?;
        writeln!(f, "Extent   ij      {:>12} {:>12}", self.e_we, self.e_sn)?;
        writeln!(f, "NW       km      {:>12.6} {:>12.6}", self.nw_km.ns, self.nw_km.we)?;
        writeln!(f, "SE       km      {:>12.6} {:>12.6}", self.se_km.ns, self.se_km.we)?;
        writeln!(f, "Center   km      {:>12.6} {:>12.6}", self.center_km.ns, self.center_km.we)?;
        writeln!(f, "Extent   km      {:>12.2} {:>12.2}", self.extent_km.0, self.extent_km.1)?;
        writeln!(f, "NW        deg    {:>12.6} {:>12.6}", self.nw_deg.ns, self.nw_deg.we)?;
        writeln!(f, "SE        deg    {:>12.6} {:>12.6}", self.se_deg.ns, self.se_deg.we)?;
        writeln!(f, "Center    deg    {:>12.6} {:>12.6}", self.center_deg.ns, self.center_deg.we)?;
        writeln!(f, "Extent    deg    {:>12.2} {:>12.2}", self.extent_deg.ns, self.extent_deg.we)?;
        write!(f, "Run              {} .. {}", self.start_date, self.end_date)?;
        if let Some(hours) = self.run_hours {
            write!(f, " ({} h)", hours)?;
        }
        writeln!(f)
    }
}
