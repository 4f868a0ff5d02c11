use std::collections::HashMap;
use tokio_util::sync::CancellationToken;

/// The independent request streams of the booking wizard. At most one request
/// per kind is current at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchKind {
    Services,
    Barbers,
    Slots,
    Booking,
}

/// Identity and cancellation handle of one issued request.
#[derive(Debug, Clone)]
pub struct FetchTicket {
    id: u64,
    kind: FetchKind,
    token: CancellationToken,
}

impl FetchTicket {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn kind(&self) -> FetchKind {
        self.kind
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl PartialEq for FetchTicket {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.kind == other.kind
    }
}

impl Eq for FetchTicket {}

/// Registry of the current ticket per [`FetchKind`].
///
/// Issuing a ticket cancels the previous one of the same kind. A result is
/// accepted only if it settles the current, uncancelled ticket of its kind;
/// anything else is stale.
#[derive(Debug, Default)]
pub struct InFlight {
    last_id: u64,
    current: HashMap<FetchKind, FetchTicket>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self, kind: FetchKind) -> FetchTicket {
        self.cancel(kind);
        self.last_id += 1;
        let ticket = FetchTicket {
            id: self.last_id,
            kind,
            token: CancellationToken::new(),
        };
        self.current.insert(kind, ticket.clone());
        ticket
    }

    pub fn cancel(&mut self, kind: FetchKind) {
        if let Some(ticket) = self.current.remove(&kind) {
            ticket.token.cancel();
        }
    }

    pub fn cancel_all(&mut self) {
        for (_, ticket) in self.current.drain() {
            ticket.token.cancel();
        }
    }

    pub fn is_current(&self, kind: FetchKind, id: u64) -> bool {
        self.current
            .get(&kind)
            .is_some_and(|ticket| ticket.id == id && !ticket.token.is_cancelled())
    }

    /// Retire the ticket if it is current. Returns whether the result should be applied.
    pub fn settle(&mut self, kind: FetchKind, id: u64) -> bool {
        if self.is_current(kind, id) {
            self.current.remove(&kind);
            true
        } else {
            false
        }
    }

    pub fn is_pending(&self, kind: FetchKind) -> bool {
        self.current.contains_key(&kind)
    }
}
