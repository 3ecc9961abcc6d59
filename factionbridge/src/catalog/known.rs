//! Identities of the faction plugins the bridge recognises.
//!
//! Fingerprints are the author lists the plugins ship in their manifests. A
//! plugin whose author list changed between releases carries one fingerprint
//! per variant.

use super::ProviderIdentity;
use crate::matcher::AuthorConfiguration;

/// One author set as it appears in the static table.
#[derive(Debug, Clone, Copy)]
pub struct KnownFingerprint {
    pub version: &'static str,
    pub authors: &'static [&'static str],
}

/// Static identity of a supported plugin.
#[derive(Debug, Clone, Copy)]
pub struct KnownProvider {
    pub id: &'static str,
    pub plugin_name: &'static str,
    pub fingerprints: &'static [KnownFingerprint],
}

impl KnownProvider {
    pub fn identity(&self) -> ProviderIdentity {
        ProviderIdentity::new(
            self.id,
            self.plugin_name,
            self.fingerprints
                .iter()
                .map(|fp| AuthorConfiguration::new(fp.version, fp.authors.iter().copied()))
                .collect(),
        )
    }
}

/// Supported plugins, in resolution order.
///
/// Several forks share the `Factions` display name and are told apart by their
/// author lists. A fork whose authors extend another fork's list must come
/// before it, otherwise coverage matching binds the fork it extends.
pub static KNOWN_PROVIDERS: &[KnownProvider] = &[
    KnownProvider {
        id: "Factions_SaberFactions",
        plugin_name: "Factions",
        fingerprints: &[KnownFingerprint {
            version: "1.6.9.5-2.x",
            authors: &["Olof Larsson", "Brett Flannigan", "drtshock", "ProSavage", "Driftay"],
        }],
    },
    KnownProvider {
        id: "Factions_FactionsUUID",
        plugin_name: "Factions",
        fingerprints: &[
            KnownFingerprint {
                version: "1.6.9.5-U0.6.x",
                authors: &["Olof Larsson", "Brett Flannigan", "drtshock", "mbaxter"],
            },
            KnownFingerprint {
                version: "1.6.9.5-U0.5.x",
                authors: &["Olof Larsson", "Brett Flannigan", "drtshock"],
            },
        ],
    },
    KnownProvider {
        id: "Factions_AtlasFactions",
        plugin_name: "Factions",
        fingerprints: &[KnownFingerprint {
            version: "1.x",
            authors: &["Cayorion", "Madus", "Ulumulu1510", "MarokoGames", "AtlasMC"],
        }],
    },
    KnownProvider {
        id: "Factions_MassiveCraft",
        plugin_name: "Factions",
        fingerprints: &[
            KnownFingerprint {
                version: "3.x",
                authors: &["Cayorion", "Madus", "Ulumulu1510", "MarokoGames", "Marxster"],
            },
            KnownFingerprint {
                version: "2.x",
                authors: &["Cayorion", "Madus", "Ulumulu1510", "MarokoGames"],
            },
        ],
    },
    KnownProvider {
        id: "Factions_LegacyFactions",
        plugin_name: "LegacyFactions",
        fingerprints: &[KnownFingerprint {
            version: "1.4.x",
            authors: &["MarkehMe"],
        }],
    },
    KnownProvider {
        id: "Factions_FactionsX",
        plugin_name: "FactionsX",
        fingerprints: &[KnownFingerprint {
            version: "1.x",
            authors: &["ProSavage"],
        }],
    },
    KnownProvider {
        id: "Factions_MedievalFactions",
        plugin_name: "MedievalFactions",
        fingerprints: &[KnownFingerprint {
            version: "4.x",
            authors: &["DanTheTechMan", "Pasarus", "Caibinus"],
        }],
    },
    KnownProvider {
        id: "Factions_UltimateFactions",
        plugin_name: "UltimateFactions",
        fingerprints: &[KnownFingerprint {
            version: "2.x",
            authors: &["Dalton"],
        }],
    },
    KnownProvider {
        id: "Kingdoms_KingdomsX",
        plugin_name: "Kingdoms",
        fingerprints: &[KnownFingerprint {
            version: "1.x",
            authors: &["Crypto Morin"],
        }],
    },
    KnownProvider {
        id: "Towny_Towny",
        plugin_name: "Towny",
        fingerprints: &[KnownFingerprint {
            version: "0.9x",
            authors: &["Shade", "ElgarL", "LlmDl"],
        }],
    },
];
