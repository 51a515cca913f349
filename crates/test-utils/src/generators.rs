//! Generated namelist documents.
//!
//! Builds YAML namelists with an arbitrary number of domains for tests
//! that need more variety than the fixed fixtures.

use std::fmt::Write;

/// One domain entry for [`NamelistBuilder`].
#[derive(Debug, Clone)]
pub struct DomainSpec {
    pub parent_id: i64,
    pub ratio: i64,
    pub i_start: i64,
    pub j_start: i64,
    pub e_we: i64,
    pub e_sn: i64,
    pub geog_data_res: String,
}

/// Builder for YAML namelist documents.
#[derive(Debug, Clone)]
pub struct NamelistBuilder {
    pub dx: f64,
    pub dy: f64,
    pub truelat1: f64,
    pub truelat2: f64,
    pub ref_lat: f64,
    pub ref_lon: f64,
    pub map_proj: String,
    pub start_date: String,
    pub end_date: String,
    domains: Vec<DomainSpec>,
}

impl NamelistBuilder {
    /// Root domain of `e_we` x `e_sn` points at `dx` x `dy` meters.
    pub fn new(dx: f64, dy: f64, e_we: i64, e_sn: i64) -> Self {
        Self {
            dx,
            dy,
            truelat1: 30.0,
            truelat2: 60.0,
            ref_lat: 52.0,
            ref_lon: 5.0,
            map_proj: "lambert".to_string(),
            start_date: "2024-01-15_00:00:00".to_string(),
            end_date: "2024-01-16_00:00:00".to_string(),
            domains: vec![DomainSpec {
                parent_id: 1,
                ratio: 1,
                i_start: 1,
                j_start: 1,
                e_we,
                e_sn,
                geog_data_res: "10m".to_string(),
            }],
        }
    }

    /// Set the projection parameters.
    pub fn projection(mut self, truelat1: f64, truelat2: f64, ref_lat: f64, ref_lon: f64) -> Self {
        self.truelat1 = truelat1;
        self.truelat2 = truelat2;
        self.ref_lat = ref_lat;
        self.ref_lon = ref_lon;
        self
    }

    /// Append a nested domain.
    #[allow(clippy::too_many_arguments)]
    pub fn nest(
        mut self,
        parent_id: i64,
        ratio: i64,
        i_start: i64,
        j_start: i64,
        e_we: i64,
        e_sn: i64,
        geog_data_res: &str,
    ) -> Self {
        self.domains.push(DomainSpec {
            parent_id,
            ratio,
            i_start,
            j_start,
            e_we,
            e_sn,
            geog_data_res: geog_data_res.to_string(),
        });
        self
    }

    fn join<F: Fn(&DomainSpec) -> String>(&self, f: F) -> String {
        self.domains.iter().map(f).collect::<Vec<_>>().join(", ")
    }

    /// Render the document as YAML with list-valued per-domain fields.
    pub fn to_yaml(&self) -> String {
        let n = self.domains.len();
        let repeat = |s: &str| vec![format!("\"{}\"", s); n].join(", ");

        let mut out = String::new();
        let _ = writeln!(out, "share:");
        let _ = writeln!(out, "  max_dom: {}", n);
        let _ = writeln!(out, "  start_date: [{}]", repeat(&self.start_date));
        let _ = writeln!(out, "  end_date: [{}]", repeat(&self.end_date));
        let _ = writeln!(out, "geogrid:");
        let _ = writeln!(out, "  parent_id: [{}]", self.join(|d| d.parent_id.to_string()));
        let _ = writeln!(out, "  parent_grid_ratio: [{}]", self.join(|d| d.ratio.to_string()));
        let _ = writeln!(out, "  i_parent_start: [{}]", self.join(|d| d.i_start.to_string()));
        let _ = writeln!(out, "  j_parent_start: [{}]", self.join(|d| d.j_start.to_string()));
        let _ = writeln!(out, "  e_we: [{}]", self.join(|d| d.e_we.to_string()));
        let _ = writeln!(out, "  e_sn: [{}]", self.join(|d| d.e_sn.to_string()));
        let _ = writeln!(
            out,
            "  geog_data_res: [{}]",
            self.join(|d| format!("\"{}\"", d.geog_data_res))
        );
        let _ = writeln!(out, "  dx: {:?}", self.dx);
        let _ = writeln!(out, "  dy: {:?}", self.dy);
        let _ = writeln!(out, "  map_proj: {}", self.map_proj);
        let _ = writeln!(out, "  ref_lat: {:?}", self.ref_lat);
        let _ = writeln!(out, "  ref_lon: {:?}", self.ref_lon);
        let _ = writeln!(out, "  truelat1: {:?}", self.truelat1);
        let _ = writeln!(out, "  truelat2: {:?}", self.truelat2);
        out
    }
}
