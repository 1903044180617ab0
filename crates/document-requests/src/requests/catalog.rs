use std::collections::HashMap;
use std::sync::OnceLock;

use serde::Serialize;

/// Description shown for document types the catalog does not know.
pub const GENERIC_DESCRIPTION: &str = "Dieses Dokument wurde angefordert.";

/// Logical grouping used when listing the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentGroup {
    /// General and property documents.
    General,
    /// Applicant and financial documents.
    Applicant,
}

impl DocumentGroup {
    pub const ALL: [DocumentGroup; 2] = [DocumentGroup::General, DocumentGroup::Applicant];

    pub const fn label(self) -> &'static str {
        match self {
            DocumentGroup::General => "Allgemeine Unterlagen und Wohnraum",
            DocumentGroup::Applicant => "Antragsteller und Finanzen",
        }
    }
}

/// Display metadata for one document type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentMetadata {
    pub title: &'static str,
    pub description: &'static str,
    pub group: DocumentGroup,
}

static CATALOG: OnceLock<HashMap<&'static str, DocumentMetadata>> = OnceLock::new();

pub fn lookup(document_type_id: &str) -> Option<&'static DocumentMetadata> {
    catalog().get(document_type_id)
}

/// Catalog title, or the raw id when the type is unknown.
pub fn title_for(document_type_id: &str) -> String {
    lookup(document_type_id)
        .map(|metadata| metadata.title.to_string())
        .unwrap_or_else(|| document_type_id.to_string())
}

pub fn description_for(document_type_id: &str) -> &'static str {
    lookup(document_type_id)
        .map(|metadata| metadata.description)
        .unwrap_or(GENERIC_DESCRIPTION)
}

/// Entries of one group ordered by id.
pub fn entries(group: DocumentGroup) -> Vec<(&'static str, &'static DocumentMetadata)> {
    let mut entries: Vec<_> = catalog()
        .iter()
        .filter(|(_, metadata)| metadata.group == group)
        .map(|(id, metadata)| (*id, metadata))
        .collect();
    entries.sort_by_key(|(id, _)| *id);
    entries
}

fn catalog() -> &'static HashMap<&'static str, DocumentMetadata> {
    CATALOG.get_or_init(|| {
        const GENERAL: &[(&str, &str, &str)] = &[
            (
                "meldebescheinigung",
                "Meldebescheinigung",
                "Aktuelle Bescheinigung des Einwohnermeldeamts über Ihren Wohnsitz.",
            ),
            (
                "mietvertrag",
                "Mietvertrag",
                "Vollständiger, von allen Parteien unterschriebener Mietvertrag.",
            ),
            (
                "mietbescheinigung",
                "Mietbescheinigung",
                "Vom Vermieter ausgefüllte Bescheinigung über Miete und Nebenkosten.",
            ),
            (
                "wohnungsgeberbestaetigung",
                "Wohnungsgeberbestätigung",
                "Bestätigung des Wohnungsgebers über Ihren Einzug.",
            ),
            (
                "nebenkostenabrechnung",
                "Nebenkostenabrechnung",
                "Letzte Betriebs- und Heizkostenabrechnung Ihres Vermieters.",
            ),
            (
                "mietzahlungsnachweis",
                "Nachweis der Mietzahlung",
                "Kontoauszug oder Quittung über die zuletzt gezahlte Miete.",
            ),
            (
                "grundbuchauszug",
                "Grundbuchauszug",
                "Aktueller Auszug aus dem Grundbuch für selbst genutztes Eigentum.",
            ),
            (
                "wohnflaechenberechnung",
                "Wohnflächenberechnung",
                "Berechnung oder Nachweis der Wohnfläche Ihrer Wohnung.",
            ),
            (
                "untermietvertrag",
                "Untermietvertrag",
                "Vertrag über die Untervermietung einzelner Räume.",
            ),
            (
                "vollmacht",
                "Vollmacht",
                "Unterschriebene Vollmacht, wenn eine andere Person Sie vertritt.",
            ),
        ];

        const APPLICANT: &[(&str, &str, &str)] = &[
            (
                "personalausweis",
                "Personalausweis oder Reisepass",
                "Gut lesbare Kopie der Vorder- und Rückseite Ihres Ausweisdokuments.",
            ),
            (
                "aufenthaltstitel",
                "Aufenthaltstitel",
                "Kopie Ihres gültigen Aufenthaltstitels.",
            ),
            (
                "einkommensnachweis",
                "Einkommensnachweis",
                "Nachweise über alle Einkünfte der letzten zwölf Monate.",
            ),
            (
                "lohnabrechnung",
                "Lohn- und Gehaltsabrechnungen",
                "Gehaltsabrechnungen der letzten drei Monate.",
            ),
            (
                "arbeitsvertrag",
                "Arbeitsvertrag",
                "Aktueller Arbeitsvertrag einschließlich Angaben zur Befristung.",
            ),
            (
                "steuerbescheid",
                "Einkommensteuerbescheid",
                "Letzter Einkommensteuerbescheid des Finanzamts.",
            ),
            (
                "kontoauszuege",
                "Kontoauszüge",
                "Lückenlose Kontoauszüge aller Konten der letzten drei Monate.",
            ),
            (
                "rentenbescheid",
                "Rentenbescheid",
                "Aktueller Bescheid über Ihre Renten- oder Pensionszahlungen.",
            ),
            (
                "arbeitslosengeld_bescheid",
                "Bescheid über Arbeitslosengeld",
                "Aktueller Bewilligungsbescheid der Agentur für Arbeit oder des Jobcenters.",
            ),
            (
                "kindergeld_nachweis",
                "Kindergeldnachweis",
                "Bescheid der Familienkasse über das bezogene Kindergeld.",
            ),
            (
                "unterhaltsnachweis",
                "Unterhaltsnachweis",
                "Nachweis über gezahlten oder erhaltenen Unterhalt.",
            ),
            (
                "bafoeg_bescheid",
                "BAföG-Bescheid",
                "Aktueller Bescheid über Leistungen nach dem BAföG.",
            ),
            (
                "immatrikulationsbescheinigung",
                "Immatrikulationsbescheinigung",
                "Studienbescheinigung für das laufende Semester.",
            ),
            (
                "schwerbehindertenausweis",
                "Schwerbehindertenausweis",
                "Kopie des Schwerbehindertenausweises oder des Feststellungsbescheids.",
            ),
            (
                "vermoegensnachweis",
                "Vermögensnachweis",
                "Nachweise über Sparguthaben, Wertpapiere und sonstiges Vermögen.",
            ),
        ];

        let mut map = HashMap::with_capacity(GENERAL.len() + APPLICANT.len());
        for (group, rows) in [
            (DocumentGroup::General, GENERAL),
            (DocumentGroup::Applicant, APPLICANT),
        ] {
            for &(id, title, description) in rows {
                map.insert(
                    id,
                    DocumentMetadata {
                        title,
                        description,
                        group,
                    },
                );
            }
        }
        map
    })
}
