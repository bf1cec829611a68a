//! Link self-test probe.
//!
//! One side sends a fixed test request and polls for the fixed response;
//! the other side recognizes the request and answers. Polling is bounded
//! so a dead link reports failure instead of hanging.

use std::time::{Duration, Instant};

use crate::message::{WirelessCommand, WirelessMessage};

/// Body of the probe request.
pub const TEST_REQUEST: &str = "wl-8749";

/// Body of the probe response.
pub const TEST_RESPONSE: &str = "wl-0462";

/// True if the message is a probe request that should be answered.
pub fn matches_test_request(msg: &WirelessMessage) -> bool {
    msg.command == WirelessCommand::Test && msg.body == TEST_REQUEST
}

/// True if the message completes a probe we initiated.
pub fn matches_test_response(msg: &WirelessMessage) -> bool {
    msg.command == WirelessCommand::Test && msg.body == TEST_RESPONSE
}

/// Builds the outbound probe request.
pub fn test_request() -> WirelessMessage {
    WirelessMessage::new(WirelessCommand::Test, TEST_REQUEST)
}

/// Builds the reply to a probe request.
pub fn test_response() -> WirelessMessage {
    WirelessMessage::new(WirelessCommand::Test, TEST_RESPONSE)
}

/// What a probe run measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeMode {
    /// One request, time to first response.
    Latency,
    /// Repeated requests, responses per run.
    Throughput,
}

/// Line discipline the probe drives. Implemented by the actual radio
/// link in production and by in-memory fakes in tests.
pub trait ProbeTransport {
    /// Queues a line for transmission.
    fn send(&mut self, line: &str);
    /// Returns the next received line, if one has arrived.
    fn recv(&mut self) -> Option<String>;
}

/// Outcome of one probe run.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeReport {
    pub mode: ProbeMode,
    pub requests_sent: u32,
    pub responses_seen: u32,
    /// Round-trip time of each answered request, in round order.
    pub round_trips: Vec<Duration>,
    /// Bytes of probe text exchanged in both directions.
    pub bytes_exchanged: usize,
    pub elapsed: Duration,
}

impl ProbeReport {
    /// A run succeeds if every request was answered.
    pub fn passed(&self) -> bool {
        self.requests_sent > 0 && self.responses_seen == self.requests_sent
    }

    /// Mean round-trip time in milliseconds, if anything was answered.
    pub fn average_latency_ms(&self) -> Option<f64> {
        if self.round_trips.is_empty() {
            return None;
        }
        let total: Duration = self.round_trips.iter().sum();
        Some(total.as_secs_f64() * 1e3 / self.round_trips.len() as f64)
    }

    /// Probe traffic rate over the whole run, in bytes per second.
    pub fn throughput_bytes_per_sec(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs == 0.0 {
            return 0.0;
        }
        self.bytes_exchanged as f64 / secs
    }
}

/// Bounded request/response exerciser for a wireless link.
#[derive(Debug, Clone)]
pub struct LinkProbe {
    mode: ProbeMode,
    rounds: u32,
    max_polls: u32,
    poll_delay: Duration,
}

impl LinkProbe {
    pub fn new(mode: ProbeMode) -> Self {
        let rounds = match mode {
            ProbeMode::Latency => 1,
            ProbeMode::Throughput => 16,
        };
        LinkProbe {
            mode,
            rounds,
            max_polls: 50,
            poll_delay: Duration::from_millis(20),
        }
    }

    /// Overrides the number of request rounds.
    pub fn rounds(mut self, rounds: u32) -> Self {
        self.rounds = rounds.max(1);
        self
    }

    /// Overrides the per-request poll budget.
    pub fn poll_budget(mut self, max_polls: u32, poll_delay: Duration) -> Self {
        self.max_polls = max_polls.max(1);
        self.poll_delay = poll_delay;
        self
    }

    /// Runs the probe to completion over the given transport.
    pub fn run<T: ProbeTransport>(&self, transport: &mut T) -> ProbeReport {
        let started = Instant::now();
        let request = test_request().encode();
        let response_len = test_response().encode().len();
        let mut responses_seen = 0;
        let mut round_trips = Vec::new();
        let mut bytes_exchanged = 0;
        for round in 0..self.rounds {
            let sent_at = Instant::now();
            transport.send(&request);
            bytes_exchanged += request.len();
            if self.await_response(transport) {
                responses_seen += 1;
                round_trips.push(sent_at.elapsed());
                bytes_exchanged += response_len;
            } else {
                tracing::warn!(round, "probe request went unanswered");
            }
        }
        ProbeReport {
            mode: self.mode,
            requests_sent: self.rounds,
            responses_seen,
            round_trips,
            bytes_exchanged,
            elapsed: started.elapsed(),
        }
    }

    fn await_response<T: ProbeTransport>(&self, transport: &mut T) -> bool {
        for poll in 0..self.max_polls {
            while let Some(line) = transport.recv() {
                let msg = WirelessMessage::decode(&line);
                if matches_test_response(&msg) {
                    return true;
                }
                if matches_test_request(&msg) {
                    // The peer is probing us at the same time; answer it.
                    transport.send(&test_response().encode());
                }
            }
            if poll + 1 < self.max_polls {
                std::thread::sleep(self.poll_delay);
            }
        }
        false
    }
}
