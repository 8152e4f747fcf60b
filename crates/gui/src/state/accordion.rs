//! Configurator sections and the "collapse all" broadcast.
//!
//! A collapse request is published once on the [`CollapseBus`]; every
//! subscribed section receives its own copy and reacts to it exactly once,
//! no matter how many frames pass before it drains its inbox.

/// Where a collapse request came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollapseSource {
    /// Button in the configurator panel header
    PanelHeader,
    /// Button next to "Customize your Chair"
    SectionGroupHeader,
    /// Per-section button in the narrow layout
    Section(SectionId),
}

/// One published collapse request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollapseEvent {
    pub seq: u64,
    pub source: CollapseSource,
}

/// Handle returned by [`CollapseBus::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerId(usize);

/// One-shot broadcast of collapse requests to every subscriber
#[derive(Debug, Default)]
pub struct CollapseBus {
    inboxes: Vec<Vec<CollapseEvent>>,
    next_seq: u64,
}

impl CollapseBus {
    pub fn subscribe(&mut self) -> ListenerId {
        self.inboxes.push(Vec::new());
        ListenerId(self.inboxes.len() - 1)
    }

    /// Deliver a new event to every current subscriber
    pub fn publish(&mut self, source: CollapseSource) -> CollapseEvent {
        let event = CollapseEvent {
            seq: self.next_seq,
            source,
        };
        self.next_seq += 1;
        for inbox in &mut self.inboxes {
            inbox.push(event);
        }
        tracing::debug!("Collapse-all #{} from {:?}", event.seq, source);
        event
    }

    /// Take all events pending for a listener
    pub fn take(&mut self, id: ListenerId) -> Vec<CollapseEvent> {
        self.inboxes
            .get_mut(id.0)
            .map(std::mem::take)
            .unwrap_or_default()
    }

    pub fn pending(&self, id: ListenerId) -> usize {
        self.inboxes.get(id.0).map_or(0, Vec::len)
    }

    /// Number of events published so far
    pub fn published(&self) -> u64 {
        self.next_seq
    }
}

/// The three configurator sections, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionId {
    Arms,
    ArmFinish,
    LegsFinish,
}

impl SectionId {
    pub fn all() -> &'static [SectionId] {
        &[SectionId::Arms, SectionId::ArmFinish, SectionId::LegsFinish]
    }

    pub fn title(&self) -> &'static str {
        match self {
            SectionId::Arms => "1. Arms",
            SectionId::ArmFinish => "2. Arm Finish",
            SectionId::LegsFinish => "3. Legs Finish",
        }
    }

    /// Color/finish starts expanded, the rest start collapsed
    pub fn default_open(&self) -> bool {
        matches!(self, SectionId::ArmFinish)
    }
}

/// Open/closed state of one collapsible section
#[derive(Debug)]
pub struct SectionState {
    pub id: SectionId,
    open: bool,
    listener: ListenerId,
}

impl SectionState {
    pub fn new(id: SectionId, bus: &mut CollapseBus) -> Self {
        Self {
            id,
            open: id.default_open(),
            listener: bus.subscribe(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// React to pending collapse events. Returns how many were consumed.
    pub fn receive(&mut self, bus: &mut CollapseBus) -> usize {
        let events = bus.take(self.listener);
        if !events.is_empty() {
            self.open = false;
        }
        events.len()
    }
}

/// All configurator sections plus the bus that closes them
#[derive(Debug)]
pub struct ConfiguratorState {
    bus: CollapseBus,
    sections: Vec<SectionState>,
}

impl Default for ConfiguratorState {
    fn default() -> Self {
        let mut bus = CollapseBus::default();
        let sections = SectionId::all()
            .iter()
            .map(|&id| SectionState::new(id, &mut bus))
            .collect();
        Self { bus, sections }
    }
}

impl ConfiguratorState {
    pub fn collapse_all(&mut self, source: CollapseSource) -> CollapseEvent {
        self.bus.publish(source)
    }

    /// Let every section handle its pending events (once per frame)
    pub fn dispatch(&mut self) {
        for section in &mut self.sections {
            section.receive(&mut self.bus);
        }
    }

    pub fn toggle(&mut self, id: SectionId) {
        if let Some(section) = self.section_mut(id) {
            section.toggle();
        }
    }

    pub fn is_open(&self, id: SectionId) -> bool {
        self.sections
            .iter()
            .find(|s| s.id == id)
            .is_some_and(SectionState::is_open)
    }

    pub fn open_sections(&self) -> Vec<SectionId> {
        self.sections
            .iter()
            .filter(|s| s.is_open())
            .map(|s| s.id)
            .collect()
    }

    pub fn bus(&self) -> &CollapseBus {
        &self.bus
    }

    fn section_mut(&mut self, id: SectionId) -> Option<&mut SectionState> {
        self.sections.iter_mut().find(|s| s.id == id)
    }
}
