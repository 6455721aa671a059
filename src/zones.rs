// src/zones.rs - Static zone reference table

pub const ZONE_COUNT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneSite {
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

/// Order is significant: scenario offset vectors index into it.
pub const ZONE_SITES: [ZoneSite; ZONE_COUNT] = [
    ZoneSite { name: "Zürich Innenstadt", latitude: 47.3769, longitude: 8.5417 },
    ZoneSite { name: "Zürich West", latitude: 47.3890, longitude: 8.5000 },
    ZoneSite { name: "Bern Zentrum", latitude: 46.9480, longitude: 7.4474 },
    ZoneSite { name: "Bern Wankdorf", latitude: 46.9650, longitude: 7.4640 },
    ZoneSite { name: "Luzern Altstadt", latitude: 47.0502, longitude: 8.3093 },
    ZoneSite { name: "Basel Bahnhof", latitude: 47.5475, longitude: 7.5890 },
    ZoneSite { name: "Winterthur Bahnhof", latitude: 47.5000, longitude: 8.7240 },
    ZoneSite { name: "St. Gallen Zentrum", latitude: 47.4245, longitude: 9.3767 },
    ZoneSite { name: "Lausanne Gare", latitude: 46.5160, longitude: 6.6291 },
    ZoneSite { name: "Genf Cornavin", latitude: 46.2100, longitude: 6.1423 },
];
