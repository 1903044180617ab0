use crate::infra::{load_store, parse_instant, parse_zone};
use crate::routes::catalog_views;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use clap::Args;
use document_requests::config::AppConfig;
use document_requests::display::DisplayFormatter;
use document_requests::error::AppError;
use document_requests::requests::catalog::{self, DocumentGroup};
use document_requests::requests::{
    ApplicantId, EnrichedDocumentRequest, FixedClock, OutstandingRequestsService, ResolutionState,
};
use std::fmt::Write;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ListArgs {
    /// Resident whose latest application should be inspected
    #[arg(long)]
    pub(crate) resident: String,
    /// JSON fixture seeding the document store (defaults to APP_FIXTURES_PATH)
    #[arg(long)]
    pub(crate) fixtures: Option<PathBuf>,
    /// Display time zone (defaults to APP_DISPLAY_TIMEZONE)
    #[arg(long, value_parser = parse_zone)]
    pub(crate) timezone: Option<Tz>,
    /// Resolve as of this RFC 3339 instant instead of the current time
    #[arg(long, value_parser = parse_instant)]
    pub(crate) now: Option<DateTime<Utc>>,
    /// Emit the resolution state as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct CatalogArgs {
    /// Emit the catalog as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) async fn run_list(args: ListArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let Some(applicant) = ApplicantId::parse(&args.resident) else {
        eprintln!("--resident must not be blank");
        return Ok(());
    };

    let fixtures = args.fixtures.or(config.store.fixtures_path);
    let store = Arc::new(load_store(fixtures.as_deref()).await?);
    let clock = Arc::new(FixedClock(args.now.unwrap_or_else(Utc::now)));
    let service = OutstandingRequestsService::with_clock(store, clock);

    let state = ResolutionState::from(service.resolve_outstanding_requests(&applicant).await);

    if args.json {
        let rendered = serde_json::to_string_pretty(&state).map_err(std::io::Error::other)?;
        println!("{rendered}");
        return Ok(());
    }

    let formatter = DisplayFormatter::new(args.timezone.unwrap_or(config.display.time_zone));
    let rendered = render_state(&applicant, &state, &formatter);
    // A failed lookup is advisory; the command still succeeds.
    match state {
        ResolutionState::Failed { .. } => eprint!("{rendered}"),
        _ => print!("{rendered}"),
    }
    Ok(())
}

pub(crate) fn run_catalog(args: CatalogArgs) -> Result<(), AppError> {
    if args.json {
        let rendered =
            serde_json::to_string_pretty(&catalog_views()).map_err(std::io::Error::other)?;
        println!("{rendered}");
        return Ok(());
    }

    for group in DocumentGroup::ALL {
        println!("{}", group.label());
        for (id, metadata) in catalog::entries(group) {
            println!("  {id:<32} {}", metadata.title);
        }
    }
    Ok(())
}

pub(crate) fn render_state(
    applicant: &ApplicantId,
    state: &ResolutionState,
    formatter: &DisplayFormatter,
) -> String {
    let mut out = String::new();
    match state {
        ResolutionState::Loading => {
            writeln!(&mut out, "Unterlagen werden geladen ...").expect("write loading");
        }
        ResolutionState::Failed { message } => {
            writeln!(&mut out, "Hinweis: {message}").expect("write failure note");
        }
        ResolutionState::Ready { requests } if requests.is_empty() => {
            writeln!(&mut out, "Keine ausstehenden Unterlagen für {applicant}.")
                .expect("write empty listing");
        }
        ResolutionState::Ready { requests } => {
            writeln!(
                &mut out,
                "Ausstehende Unterlagen für {applicant} ({} offen)",
                requests.len()
            )
            .expect("write listing header");
            for request in requests {
                render_request(&mut out, request, formatter);
            }
        }
    }
    out
}

fn render_request(
    out: &mut String,
    request: &EnrichedDocumentRequest,
    formatter: &DisplayFormatter,
) {
    let raw = &request.request;
    writeln!(out, "- {} [{}]", request.document_title, raw.token).expect("write title");
    writeln!(out, "  {}", request.document_description).expect("write description");
    writeln!(
        out,
        "  Angefordert: {} von {}",
        formatter.format(raw.requested_at),
        request.requesting_agent_name
    )
    .expect("write requested");
    let expired = if request.is_expired {
        " (abgelaufen)"
    } else {
        ""
    };
    writeln!(out, "  Frist: {}{expired}", formatter.format(raw.expires_at))
        .expect("write deadline");
    if !raw.applicant_name.is_empty() {
        writeln!(out, "  Für: {}", raw.applicant_name).expect("write applicant");
    }
    if !raw.custom_message.is_empty() {
        writeln!(out, "  Hinweis: {}", raw.custom_message).expect("write message");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use document_requests::requests::{enrich, DocumentRequestRecord};

    fn applicant() -> ApplicantId {
        ApplicantId("res-7".to_string())
    }

    #[test]
    fn renders_expired_requests_with_marker() {
        let now = Utc
            .with_ymd_and_hms(2024, 6, 1, 12, 0, 0)
            .single()
            .expect("valid timestamp");
        let record = DocumentRequestRecord {
            token: "req-1".to_string(),
            document_type_id: "meldebescheinigung".to_string(),
            applicant_name: "Erika Mustermann".to_string(),
            requested_at: Utc.with_ymd_and_hms(2024, 3, 5, 8, 7, 0).single(),
            expires_at: Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).single(),
            ..DocumentRequestRecord::default()
        };
        let state = ResolutionState::Ready {
            requests: vec![enrich(record, now)],
        };

        let rendered = render_state(&applicant(), &state, &DisplayFormatter::new(Tz::UTC));

        assert!(rendered.contains("Meldebescheinigung [req-1]"));
        assert!(rendered.contains("Angefordert: 05.03.2024 08:07 von Sachbearbeitung"));
        assert!(rendered.contains("Frist: 01.04.2024 00:00 (abgelaufen)"));
        assert!(rendered.contains("Für: Erika Mustermann"));
        assert!(!rendered.contains("Hinweis"));
    }

    #[test]
    fn renders_loading_empty_and_failed_states() {
        let formatter = DisplayFormatter::default();
        assert_eq!(
            render_state(&applicant(), &ResolutionState::Loading, &formatter),
            "Unterlagen werden geladen ...\n"
        );

        let empty = ResolutionState::Ready {
            requests: Vec::new(),
        };
        assert!(render_state(&applicant(), &empty, &formatter).contains("Keine ausstehenden"));

        let failed = ResolutionState::Failed {
            message: "document store unavailable: timeout".to_string(),
        };
        assert_eq!(
            render_state(&applicant(), &failed, &formatter),
            "Hinweis: document store unavailable: timeout\n"
        );
    }
}
