use std::fmt;

pub const TIME_COLUMN: &str = "time";

/// One simulated detection.
///
/// The `coordinates` are fractional bin positions along each axis of the
/// intensity map the event was drawn from.
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    coordinates: Vec<f64>,
    time: f64,
}

impl Event {
    #[must_use]
    pub fn new(coordinates: Vec<f64>, time: f64) -> Self {
        Self { coordinates, time }
    }

    #[must_use]
    pub fn coordinates(&self) -> &[f64] {
        &self.coordinates
    }

    #[must_use]
    pub fn time(&self) -> f64 {
        self.time
    }
}

impl fmt::Display for Event {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "Event({:?} @ {})", self.coordinates, self.time)
    }
}

/// The sampled events, as a table with one named column per map axis
/// followed by the arrival time column.
#[derive(Clone, Debug, PartialEq)]
#[allow(clippy::module_name_repetitions)]
pub struct EventList {
    columns: Vec<String>,
    events: Vec<Event>,
}

impl EventList {
    #[must_use]
    #[debug_requires(
        events.iter().all(|event| event.coordinates.len() == axis_names.len()),
        "every event has one coordinate per axis"
    )]
    pub fn new(axis_names: &[String], events: Vec<Event>) -> Self {
        let mut columns = axis_names.to_vec();
        columns.push(String::from(TIME_COLUMN));

        Self { columns, events }
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }

    /// Returns the values of the column `name` in event order, or `None` if
    /// no such column exists.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        let index = self.columns.iter().position(|column| column == name)?;

        if index + 1 == self.columns.len() {
            Some(self.events.iter().map(Event::time).collect())
        } else {
            Some(
                self.events
                    .iter()
                    .map(|event| event.coordinates[index])
                    .collect(),
            )
        }
    }

    #[must_use]
    pub fn into_events(self) -> Vec<Event> {
        self.events
    }
}

impl<'a> IntoIterator for &'a EventList {
    type IntoIter = std::slice::Iter<'a, Event>;
    type Item = &'a Event;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
