//! The command pipeline.
//!
//! Each handler is a chain of steps returning `Step<T>`; a step that already
//! knows the answer returns `Err(reply)` and `?` ends the chain there.

use identity_store::IdentityStore;
use radio_identity::{parse_command, Command, IdentityKind, IdentityRecord};
use tracing::{debug, info};

use crate::context::InvocationContext;
use crate::reply::Reply;

/// A pipeline step: `Ok` to continue, `Err` to answer with that reply now.
type Step<T> = Result<T, Reply>;

/// Produce the reply for one inbound message.
///
/// The store is loaded at most once and saved at most once. Store failures
/// are absorbed by the store itself, so this always yields a reply.
pub fn respond(ctx: &InvocationContext, store: &dyn IdentityStore) -> Reply {
    let command = parse_command(&ctx.message);
    debug!(command = command.name(), sender_id = %ctx.sender_id, "Parsed message");

    let reply = match &command {
        Command::SetIdentity { kind, raw } => set_identity(ctx, store, *kind, raw),
        Command::QueryQth => query_qth(ctx, store),
        Command::Unrecognized => Ok(Reply::usage()),
    }
    .unwrap_or_else(|early| early);

    info!(
        command = command.name(),
        sender_id = %ctx.sender_id,
        reply_chars = reply.text().chars().count(),
        "Reply ready"
    );
    reply
}

fn set_identity(
    ctx: &InvocationContext,
    store: &dyn IdentityStore,
    kind: IdentityKind,
    raw: &str,
) -> Step<Reply> {
    let sender_id = require_sender(ctx)?;
    let record = sanitized_record(kind, raw)?;

    let mut book = store.load();
    book.upsert(sender_id, record.clone());
    let persisted = store.save(&book);
    info!(sender_id = %sender_id, label = %record, persisted, "Identity updated");

    Ok(Reply::saved(&record))
}

fn require_sender(ctx: &InvocationContext) -> Step<&str> {
    if ctx.sender_id.is_empty() {
        return Err(Reply::missing_sender());
    }
    Ok(ctx.sender_id.as_str())
}

fn sanitized_record(kind: IdentityKind, raw: &str) -> Step<IdentityRecord> {
    IdentityRecord::new(kind, raw).map_err(|e| {
        debug!(kind = %kind, error = %e, "Rejected identifier");
        Reply::invalid_identifier(kind)
    })
}

fn query_qth(ctx: &InvocationContext, store: &dyn IdentityStore) -> Step<Reply> {
    let book = store.load();
    let name = ctx.display_name(book.get(&ctx.sender_id));

    let sender = ctx
        .sender_position()
        .ok_or_else(|| Reply::new(format!("{name}: no GPS location available")))?;
    let grid = sender.grid_locator();

    let Some(station) = ctx.station_position() else {
        return Ok(Reply::new(format!("{name}: {grid}")));
    };

    let miles = sender.distance_miles_to(&station);
    let bearing = sender.bearing_to(&station);
    Ok(Reply::new(format!(
        "{name}: {grid} • {miles:.1} mi @ {bearing}°"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use identity_store::{IdentityBook, MemoryStore};

    fn ctx(message: &str) -> InvocationContext {
        InvocationContext {
            message: message.to_string(),
            sender_id: "!a1b2".to_string(),
            ..Default::default()
        }
    }

    fn book_with(sender_id: &str, kind: IdentityKind, raw: &str) -> IdentityBook {
        let mut book = IdentityBook::new();
        book.upsert(sender_id, IdentityRecord::new(kind, raw).unwrap());
        book
    }

    #[test]
    fn set_identity_saves_and_confirms() {
        let store = MemoryStore::default();
        let reply = respond(&ctx("!id ham W1ABC"), &store);

        assert_eq!(reply.text(), "Saved identity: HAM W1ABC");
        let saved = store.snapshot();
        let record = saved.get("!a1b2").unwrap();
        assert_eq!(record.kind(), IdentityKind::Ham);
        assert_eq!(record.identifier(), "W1ABC");
    }

    #[test]
    fn set_identity_without_sender_is_refused() {
        let store = MemoryStore::default();
        let mut context = ctx("!id ham W1ABC");
        context.sender_id.clear();

        let reply = respond(&context, &store);
        assert_eq!(reply.text(), "Cannot save identity: sender node ID missing.");
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn missing_sender_is_checked_before_identifier() {
        let store = MemoryStore::default();
        let mut context = ctx("!id ham W 1");
        context.sender_id.clear();

        let reply = respond(&context, &store);
        assert_eq!(reply.text(), "Cannot save identity: sender node ID missing.");
    }

    #[test]
    fn invalid_identifier_is_refused() {
        let store = MemoryStore::new(book_with("!a1b2", IdentityKind::Cb, "Rubber Duck"));

        let reply = respond(&ctx("!id gmrs AB"), &store);
        assert_eq!(reply.text(), "Invalid gmrs identifier.");
        assert_eq!(store.snapshot().get("!a1b2").unwrap().label(), "CB Rubber Duck");
    }

    #[test]
    fn failed_save_still_confirms() {
        let store = MemoryStore::read_only(IdentityBook::new());

        let reply = respond(&ctx("!id club Mesh Crew"), &store);
        assert_eq!(reply.text(), "Saved identity: CLUB MESH CREW");
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn set_identity_replaces_existing_record() {
        let store = MemoryStore::new(book_with("!a1b2", IdentityKind::Ham, "W1ABC"));

        respond(&ctx("!id cb Big Ben"), &store);
        assert_eq!(store.snapshot().get("!a1b2").unwrap().label(), "CB Big Ben");
        assert_eq!(store.snapshot().len(), 1);
    }

    #[test]
    fn qth_uses_saved_label() {
        let store = MemoryStore::new(book_with("!a1b2", IdentityKind::Ham, "W1ABC"));
        let context = InvocationContext {
            short_name: "Max".into(),
            sender_lat: Some(40.0),
            sender_lon: Some(-105.0),
            ..ctx("!qth")
        };

        assert_eq!(respond(&context, &store).text(), "HAM W1ABC: DN70ma");
    }

    #[test]
    fn qth_without_position() {
        let store = MemoryStore::default();
        let context = InvocationContext {
            short_name: "Max".into(),
            sender_lat: Some(40.0),
            station_lat: Some(39.0),
            station_lon: Some(-104.0),
            ..ctx("!qth")
        };

        assert_eq!(
            respond(&context, &store).text(),
            "Max: no GPS location available"
        );
    }

    #[test]
    fn qth_with_station_adds_distance_and_bearing() {
        let store = MemoryStore::default();
        let context = InvocationContext {
            short_name: "Max".into(),
            sender_lat: Some(40.0),
            sender_lon: Some(-105.0),
            station_lat: Some(39.0),
            station_lon: Some(-104.0),
            ..ctx("!qth")
        };

        assert_eq!(
            respond(&context, &store).text(),
            "Max: DN70ma • 87.3 mi @ 142°"
        );
    }

    #[test]
    fn qth_across_the_globe_reports_a_real_distance() {
        let store = MemoryStore::default();
        let context = InvocationContext {
            short_name: "Max".into(),
            sender_lat: Some(-82.0),
            sender_lon: Some(-179.0),
            station_lat: Some(82.0),
            station_lon: Some(1.0),
            ..ctx("!qth")
        };

        let reply = respond(&context, &store);
        assert!(!reply.text().contains("NaN"), "{}", reply.text());
        assert!(reply.text().contains(" mi @ "), "{}", reply.text());
    }

    #[test]
    fn qth_with_half_station_position_omits_distance() {
        let store = MemoryStore::default();
        let context = InvocationContext {
            sender_lat: Some(40.0),
            sender_lon: Some(-105.0),
            station_lon: Some(-104.0),
            ..ctx("!qth")
        };

        assert_eq!(respond(&context, &store).text(), "!a1b2: DN70ma");
    }

    #[test]
    fn qth_does_not_write_store() {
        let store = MemoryStore::read_only(IdentityBook::new());
        let context = InvocationContext {
            sender_lat: Some(40.0),
            sender_lon: Some(-105.0),
            ..ctx("!qth")
        };

        assert_eq!(respond(&context, &store).text(), "!a1b2: DN70ma");
    }

    #[test]
    fn unrecognized_gets_usage() {
        let store = MemoryStore::default();
        assert_eq!(respond(&ctx("hello"), &store), Reply::usage());
        assert_eq!(respond(&ctx("!qth now"), &store), Reply::usage());
        assert!(store.snapshot().is_empty());
    }
}
