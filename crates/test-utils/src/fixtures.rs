//! Common namelist fixtures for the WRF grid tools tests.
//!
//! All fixtures use a Lambert grid with standard parallels 30N/60N,
//! centred on 52N 5E.

/// Single outer domain written with bare scalars, as WRF writes a
/// `max_dom = 1` namelist.
///
/// 41 x 41 points at 500 m: the grid spans -10 km .. +10 km.
pub const ROOT_ONLY: &str = r#"share:
  wrf_core: ARW
  max_dom: 1
  start_date: "2024-01-15_00:00:00"
  end_date: "2024-01-16_12:00:00"
  interval_seconds: 21600
geogrid:
  parent_id: 1
  parent_grid_ratio: 1
  i_parent_start: 1
  j_parent_start: 1
  e_we: 41
  e_sn: 41
  geog_data_res: 30s
  dx: 500.0
  dy: 500.0
  map_proj: lambert
  ref_lat: 52.0
  ref_lon: 5.0
  truelat1: 30.0
  truelat2: 60.0
  stand_lon: 5.0
  geog_data_path: /data/geog
"#;

/// `ROOT_ONLY` as a JSON document.
pub const ROOT_ONLY_JSON: &str = r#"{
  "share": {
    "max_dom": 1,
    "start_date": "2024-01-15_00:00:00",
    "end_date": "2024-01-16_12:00:00"
  },
  "geogrid": {
    "parent_id": [1],
    "parent_grid_ratio": [1],
    "i_parent_start": [1],
    "j_parent_start": [1],
    "e_we": [41],
    "e_sn": [41],
    "geog_data_res": ["30s"],
    "dx": 500.0,
    "dy": 500.0,
    "map_proj": "lambert",
    "ref_lat": 52.0,
    "ref_lon": 5.0,
    "truelat1": 30.0,
    "truelat2": 60.0
  }
}
"#;

/// Three nested domains in a chain: d03 inside d02 inside d01.
///
/// dx: 9000 m -> 3000 m -> 600 m.
pub const THREE_DOMAIN_CHAIN: &str = r#"share:
  wrf_core: ARW
  max_dom: 3
  start_date: ["2024-01-15_00:00:00", "2024-01-15_00:00:00", "2024-01-15_06:00:00"]
  end_date: ["2024-01-16_00:00:00", "2024-01-16_00:00:00", "2024-01-15_18:00:00"]
geogrid:
  parent_id: [1, 1, 2]
  parent_grid_ratio: [1, 3, 5]
  i_parent_start: [1, 11, 6]
  j_parent_start: [1, 11, 6]
  e_we: [41, 61, 51]
  e_sn: [41, 61, 51]
  geog_data_res: [10m, 2m, 30s]
  dx: 9000.0
  dy: 9000.0
  map_proj: lambert
  ref_lat: 52.0
  ref_lon: 5.0
  truelat1: 30.0
  truelat2: 60.0
"#;

/// Lists longer than `max_dom`, as left behind after lowering `max_dom`.
pub const PADDED_LISTS: &str = r#"share:
  max_dom: 2
  start_date: ["2024-01-15_00:00:00", "2024-01-15_00:00:00", "2024-01-15_00:00:00"]
  end_date: ["2024-01-16_00:00:00", "2024-01-16_00:00:00", "2024-01-16_00:00:00"]
geogrid:
  parent_id: [1, 1, 2]
  parent_grid_ratio: [1, 3, 3]
  i_parent_start: [1, 11, 11]
  j_parent_start: [1, 11, 11]
  e_we: [41, 61, 61]
  e_sn: [41, 61, 61]
  geog_data_res: [10m, 2m, 30s]
  dx: 9000.0
  dy: 9000.0
  map_proj: lambert
  ref_lat: 52.0
  ref_lon: 5.0
  truelat1: 30.0
  truelat2: 60.0
"#;

/// A polar stereographic grid, which the tools do not support.
pub const POLAR_GRID: &str = r#"share:
  max_dom: 1
  start_date: "2024-01-15_00:00:00"
  end_date: "2024-01-16_00:00:00"
geogrid:
  parent_id: 1
  parent_grid_ratio: 1
  i_parent_start: 1
  j_parent_start: 1
  e_we: 41
  e_sn: 41
  geog_data_res: 30s
  dx: 500.0
  dy: 500.0
  map_proj: polar
  ref_lat: 80.0
  ref_lon: 0.0
  truelat1: 60.0
  truelat2: 70.0
"#;
