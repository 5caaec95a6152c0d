// A hashmap indexed by the ellipsoid name would be better, but Rust cannot
// statically initialize a hashmap, so we use a static array instead.
// Columns: name, semimajor axis, reciproque flattening, description.
#[rustfmt::skip]
pub(crate) const ELLIPSOID_LIST: [(&str, f64, f64, &str); 11] = [
    ("GRS80",      6_378_137.0,   298.257_222_101,  "GRS 1980 (IUGG, 1980)"),
    ("SIRGAS2000", 6_378_137.0,   298.257_222_101,  "GRS 1980, as used by SIRGAS2000"),
    ("WGS84",      6_378_137.0,   298.257_223_563,  "WGS 84"),
    ("intl",       6_378_388.0,   297.0,            "International 1924 (Hayford 1909, 1910)"),
    ("Hayford",    6_378_388.0,   297.0,            "International 1924 (Hayford 1909, 1910)"),
    ("SAD69",      6_378_160.0,   298.25,           "South American 1969"),
    ("GRS67",      6_378_160.0,   298.247_167_427,  "GRS 67 (IUGG 1967)"),
    ("Helmert",    6_378_200.0,   298.3,            "Helmert 1906"),
    ("clrk66",     6_378_206.4,   294.978_698_2,    "Clarke 1866"),
    ("clrk80",     6_378_249.145, 293.465,          "Clarke 1880 mod."),
    ("bessel",     6_377_397.155, 299.152_812_8,    "Bessel 1841"),
];
