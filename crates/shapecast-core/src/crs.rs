//! Coordinate reference catalog
//!
//! A conversion request carries one coordinate reference, chosen from a
//! small fixed catalog. The reference is metadata only: it is written into
//! the `.prj` sidecar of every exported dataset and never used to transform
//! coordinate values.

use serde::Serialize;

/// A spatial reference system attached to exported datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CoordinateRef {
    /// EPSG code
    pub epsg: u32,
    /// Human-readable label shown in pickers
    pub label: &'static str,
    /// WKT text written to the `.prj` sidecar
    #[serde(skip)]
    wkt: &'static str,
}

impl CoordinateRef {
    /// Look up a catalog entry by EPSG code.
    #[must_use = "an unknown code means the request cannot be built"]
    pub fn from_epsg(epsg: u32) -> Option<Self> {
        CATALOG.iter().copied().find(|c| c.epsg == epsg)
    }

    /// The `EPSG:<code>` identifier string.
    #[must_use]
    pub fn code(&self) -> String {
        format!("EPSG:{}", self.epsg)
    }

    /// WKT text for the `.prj` sidecar.
    #[inline]
    #[must_use]
    pub const fn wkt(&self) -> &'static str {
        self.wkt
    }
}

impl Default for CoordinateRef {
    /// WGS 84, the assumption the replaced converters hard-coded.
    fn default() -> Self {
        CATALOG[0]
    }
}

impl std::fmt::Display for CoordinateRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EPSG:{} ({})", self.epsg, self.label)
    }
}

/// The fixed picklist offered to callers.
pub const CATALOG: &[CoordinateRef] = &[
    CoordinateRef {
        epsg: 4326,
        label: "WGS 84 (lat/lon)",
        wkt: r#"GEOGCS["GCS_WGS_1984",DATUM["D_WGS_1984",SPHEROID["WGS_1984",6378137.0,298.257223563]],PRIMEM["Greenwich",0.0],UNIT["Degree",0.0174532925199433]]"#,
    },
    CoordinateRef {
        epsg: 3857,
        label: "Web Mercator",
        wkt: r#"PROJCS["WGS_1984_Web_Mercator_Auxiliary_Sphere",GEOGCS["GCS_WGS_1984",DATUM["D_WGS_1984",SPHEROID["WGS_1984",6378137.0,298.257223563]],PRIMEM["Greenwich",0.0],UNIT["Degree",0.0174532925199433]],PROJECTION["Mercator_Auxiliary_Sphere"],PARAMETER["False_Easting",0.0],PARAMETER["False_Northing",0.0],PARAMETER["Central_Meridian",0.0],PARAMETER["Standard_Parallel_1",0.0],PARAMETER["Auxiliary_Sphere_Type",0.0],UNIT["Meter",1.0]]"#,
    },
    CoordinateRef {
        epsg: 2154,
        label: "RGF93 / Lambert-93 (France)",
        wkt: r#"PROJCS["RGF93_Lambert_93",GEOGCS["GCS_RGF_1993",DATUM["D_RGF_1993",SPHEROID["GRS_1980",6378137.0,298.257222101]],PRIMEM["Greenwich",0.0],UNIT["Degree",0.0174532925199433]],PROJECTION["Lambert_Conformal_Conic"],PARAMETER["False_Easting",700000.0],PARAMETER["False_Northing",6600000.0],PARAMETER["Central_Meridian",3.0],PARAMETER["Standard_Parallel_1",44.0],PARAMETER["Standard_Parallel_2",49.0],PARAMETER["Latitude_Of_Origin",46.5],UNIT["Meter",1.0]]"#,
    },
    CoordinateRef {
        epsg: 25832,
        label: "ETRS89 / UTM zone 32N",
        wkt: r#"PROJCS["ETRS_1989_UTM_Zone_32N",GEOGCS["GCS_ETRS_1989",DATUM["D_ETRS_1989",SPHEROID["GRS_1980",6378137.0,298.257222101]],PRIMEM["Greenwich",0.0],UNIT["Degree",0.0174532925199433]],PROJECTION["Transverse_Mercator"],PARAMETER["False_Easting",500000.0],PARAMETER["False_Northing",0.0],PARAMETER["Central_Meridian",9.0],PARAMETER["Scale_Factor",0.9996],PARAMETER["Latitude_Of_Origin",0.0],UNIT["Meter",1.0]]"#,
    },
    CoordinateRef {
        epsg: 27700,
        label: "OSGB36 / British National Grid",
        wkt: r#"PROJCS["British_National_Grid",GEOGCS["GCS_OSGB_1936",DATUM["D_OSGB_1936",SPHEROID["Airy_1830",6377563.396,299.3249646]],PRIMEM["Greenwich",0.0],UNIT["Degree",0.0174532925199433]],PROJECTION["Transverse_Mercator"],PARAMETER["False_Easting",400000.0],PARAMETER["False_Northing",-100000.0],PARAMETER["Central_Meridian",-2.0],PARAMETER["Scale_Factor",0.9996012717],PARAMETER["Latitude_Of_Origin",49.0],UNIT["Meter",1.0]]"#,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_wgs84() {
        let crs = CoordinateRef::default();
        assert_eq!(crs.epsg, 4326);
        assert_eq!(crs.code(), "EPSG:4326");
    }

    #[test]
    fn test_from_epsg_known() {
        let crs = CoordinateRef::from_epsg(27700).unwrap();
        assert!(crs.label.contains("British"));
        assert!(crs.wkt().starts_with("PROJCS"));
    }

    #[test]
    fn test_from_epsg_unknown() {
        assert!(CoordinateRef::from_epsg(99999).is_none());
    }

    #[test]
    fn test_catalog_codes_are_unique() {
        let mut codes: Vec<u32> = CATALOG.iter().map(|c| c.epsg).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), CATALOG.len());
    }
}
