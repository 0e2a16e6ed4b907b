//! Host-side frame scheduling.

use std::collections::VecDeque;
use std::sync::Arc;

use thiserror::Error;
use winit::window::Window;

/// Handle of one scheduled frame callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameRequest(u64);

impl FrameRequest {
    pub fn id(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("no window is available to redraw")]
    NoWindow,

    #[error("host refused to schedule a frame")]
    Refused,
}

/// Something that can deliver a frame callback at the next refresh
pub trait FrameScheduler {
    fn schedule(&mut self) -> Result<FrameRequest, ScheduleError>;

    /// Drop a pending request. Callbacks that still arrive for it are ignored
    /// by the frame loop.
    fn cancel(&mut self, request: FrameRequest);
}

/// Schedules frames through winit redraw requests
pub struct RedrawScheduler {
    window: Option<Arc<Window>>,
    next_id: u64,
}

impl RedrawScheduler {
    pub fn new(window: Arc<Window>) -> Self {
        Self {
            window: Some(window),
            next_id: 0,
        }
    }

    /// Scheduler with no window attached yet; every request fails
    pub fn detached() -> Self {
        Self {
            window: None,
            next_id: 0,
        }
    }
}

impl FrameScheduler for RedrawScheduler {
    fn schedule(&mut self) -> Result<FrameRequest, ScheduleError> {
        let window = self.window.as_ref().ok_or(ScheduleError::NoWindow)?;
        window.request_redraw();

        let request = FrameRequest(self.next_id);
        self.next_id += 1;
        Ok(request)
    }

    fn cancel(&mut self, request: FrameRequest) {
        // winit cannot revoke a redraw request; the stale callback is a no-op
        log::trace!("cancelled redraw request {}", request.id());
    }
}

/// Scheduler driven by the caller, for headless runs and tests
#[derive(Debug, Default)]
pub struct ManualScheduler {
    queue: VecDeque<FrameRequest>,
    next_id: u64,
    refusing: bool,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following `schedule` call fail
    pub fn set_refusing(&mut self, refusing: bool) {
        self.refusing = refusing;
    }

    /// Deliver the oldest pending request, as the host would at a refresh
    pub fn fire(&mut self) -> Option<FrameRequest> {
        self.queue.pop_front()
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

impl FrameScheduler for ManualScheduler {
    fn schedule(&mut self) -> Result<FrameRequest, ScheduleError> {
        if self.refusing {
            return Err(ScheduleError::Refused);
        }
        let request = FrameRequest(self.next_id);
        self.next_id += 1;
        self.queue.push_back(request);
        Ok(request)
    }

    fn cancel(&mut self, request: FrameRequest) {
        self.queue.retain(|pending| *pending != request);
    }
}
