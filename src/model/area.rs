/// Search area table
///
/// Maps a human-readable region name to the integer area code understood by the
/// search endpoint. Code 0 is the whole country, which the driver skips because it
/// duplicates the per-region crawls.
use std::fmt;

/// A named geographic search scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SearchArea {
    /// Region name
    pub name: &'static str,

    /// Area code sent as the `area` query parameter
    pub code: u32,
}

const fn area(name: &'static str, code: u32) -> SearchArea {
    SearchArea { name, code }
}

impl SearchArea {
    /// Area code meaning "entire country"
    pub const UNSCOPED_CODE: u32 = 0;

    /// Every known area in crawl order
    pub const ALL: &'static [SearchArea] = &[
        area("Russia", 0),
        area("Moscow", 1),
        area("Saint Petersburg", 2),
        area("Yekaterinburg", 3),
        area("Novosibirsk", 4),
        area("Altai Krai", 1217),
        area("Amur Oblast", 1932),
        area("Arkhangelsk Oblast", 1008),
        area("Belgorod Oblast", 1817),
        area("Bryansk Oblast", 1828),
        area("Vladimir Oblast", 1716),
        area("Volgograd Oblast", 1511),
        area("Vologda Oblast", 1739),
        area("Voronezh Oblast", 1844),
        area("DPR", 2134),
        area("Jewish Autonomous Oblast", 1941),
        area("Transbaikal Krai", 1192),
        area("Zaporozhye Oblast", 2155),
        area("Ivanovo Oblast", 1754),
        area("Irkutsk Oblast", 1124),
        area("Kabardino-Balkaria", 1464),
        area("Kaliningrad Oblast", 1020),
        area("Kaluga Oblast", 1859),
        area("Kamchatka Krai", 1943),
        area("Karachay-Cherkessia", 1471),
        area("Kemerovo Oblast", 1229),
        area("Kirov Oblast", 1661),
        area("Kostroma Oblast", 1771),
        area("Krasnodar Krai", 1438),
        area("Krasnoyarsk Krai", 1146),
        area("Kurgan Oblast", 1308),
        area("Kursk Oblast", 1880),
        area("Leningrad Oblast", 145),
        area("Lipetsk Oblast", 1890),
        area("LPR", 2173),
        area("Magadan Oblast", 1946),
        area("Moscow Oblast", 2019),
        area("Murmansk Oblast", 1961),
        area("Nenets Autonomous Okrug", 1985),
        area("Nizhny Novgorod Oblast", 1679),
        area("Novgorod Oblast", 1051),
        area("Novosibirsk Oblast", 1202),
        area("Omsk Oblast", 1249),
        area("Orenburg Oblast", 1563),
        area("Oryol Oblast", 1898),
        area("Penza Oblast", 1575),
        area("Perm Krai", 1317),
        area("Primorsky Krai", 1948),
        area("Pskov Oblast", 1090),
        area("Republic of Adygea", 1422),
        area("Altai Republic", 1216),
        area("Bashkortostan", 1347),
        area("Buryatia", 1118),
        area("Dagestan", 1424),
        area("Ingushetia", 1434),
        area("Kalmykia", 1553),
        area("Karelia", 1077),
        area("Komi Republic", 1041),
        area("Crimea", 2114),
        area("Mari El", 1620),
        area("Mordovia", 1556),
        area("Sakha", 1174),
        area("North Ossetia-Alania", 1475),
        area("Tatarstan", 1624),
        area("Tuva", 1169),
        area("Khakassia", 1187),
        area("Rostov Oblast", 1530),
        area("Ryazan Oblast", 1704),
        area("Samara Oblast", 1586),
        area("Saratov Oblast", 1596),
        area("Sakhalin Oblast", 1960),
        area("Sverdlovsk Oblast", 1261),
        area("Smolensk Oblast", 1103),
        area("Stavropol Krai", 1481),
        area("Tambov Oblast", 1905),
        area("Tver Oblast", 1783),
        area("Tomsk Oblast", 1255),
        area("Tula Oblast", 1913),
        area("Tyumen Oblast", 1342),
        area("Udmurtia", 1646),
        area("Ulyanovsk Oblast", 1614),
        area("Khabarovsk Krai", 1975),
        area("Yugra", 1368),
        area("Kherson Oblast", 2209),
        area("Chelyabinsk Oblast", 1984),
        area("Chechnya", 1500),
        area("Chuvashia", 1652),
        area("Chukotka", 1982),
        area("Yamalo-Nenets Autonomous Okrug", 1414),
        area("Yaroslavl Oblast", 1806),
    ];

    /// Returns true if this is the whole-country sentinel
    pub fn is_unscoped(&self) -> bool {
        self.code == Self::UNSCOPED_CODE
    }

    /// Areas the driver crawls, in table order, with the unscoped sentinel removed
    pub fn crawlable() -> impl Iterator<Item = SearchArea> {
        Self::ALL.iter().copied().filter(|a| !a.is_unscoped())
    }

    /// Looks an area up by name
    ///
    /// Matching ignores ASCII case and treats `_`, `-` and spaces as the same
    /// separator, so `saint_petersburg` finds "Saint Petersburg".
    pub fn find(name: &str) -> Option<SearchArea> {
        let wanted = fold_name(name);
        Self::ALL.iter().copied().find(|a| fold_name(a.name) == wanted)
    }

    /// Looks an area up by its code
    pub fn by_code(code: u32) -> Option<SearchArea> {
        Self::ALL.iter().copied().find(|a| a.code == code)
    }
}

fn fold_name(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            '_' | '-' => ' ',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

impl fmt::Display for SearchArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}
