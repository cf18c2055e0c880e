//! GamepadBridge: connects a channel source to a report sink.

use crate::channels::ChannelVector;
use crate::connection::ConnectionState;
use crate::input::{ChannelSource, InputError};
use crate::output::{OutputError, ReportSink};
use crate::report::ReportEncoder;

/// A bridge that encodes channels from a source and pushes the reports to a sink.
///
/// The mode is fixed when the bridge is built. The connection gate is read
/// once per update; while disconnected, updates are dropped without error.
///
/// # Error Handling
///
/// On input errors, the bridge encodes centered channels to prevent stale axes
/// from persisting on the host. The center follows the mode's range: zero for
/// signed modes, mid-scale for unsigned modes.
pub struct GamepadBridge<'a, I, O> {
    input: I,
    output: O,
    encoder: ReportEncoder,
    connection: &'a ConnectionState,
}

impl<'a, I: ChannelSource, O: ReportSink> GamepadBridge<'a, I, O> {
    /// Create a new bridge from a source, a sink, an encoder and the connection gate.
    pub fn new(
        input: I,
        output: O,
        encoder: ReportEncoder,
        connection: &'a ConnectionState,
    ) -> Self {
        Self {
            input,
            output,
            encoder,
            connection,
        }
    }

    /// Run the bridge, forwarding channel updates indefinitely.
    ///
    /// This method never returns under normal operation.
    pub async fn run(&mut self) -> ! {
        loop {
            let _ = self.process_one().await;
        }
    }

    /// Process a single update and deliver its reports.
    ///
    /// Returns how many reports reached the sink (0 while disconnected).
    pub async fn process_one(&mut self) -> Result<usize, BridgeError> {
        match self.input.receive().await {
            Ok(channels) => {
                trace!("received channels: {:?}", channels);
                self.deliver(&channels).await.map_err(BridgeError::Output)
            }
            Err(e) => {
                error!("input error: {:?}", e);
                // Send centered channels to prevent stale inputs
                let centered = ChannelVector::centered(self.encoder.params().axis_range);
                let _ = self.deliver(&centered).await;
                Err(BridgeError::Input(e))
            }
        }
    }

    async fn deliver(&mut self, channels: &ChannelVector) -> Result<usize, OutputError> {
        let reports = self.encoder.encode(channels, self.connection);
        if reports.is_empty() {
            trace!("not connected, update dropped");
            return Ok(0);
        }

        for report in &reports {
            if let Err(e) = self.output.send(report).await {
                warn!("report {} not delivered: {:?}", report.report_id(), e);
                return Err(e);
            }
        }
        Ok(reports.len())
    }

    /// Get the encoder in use.
    pub fn encoder(&self) -> &ReportEncoder {
        &self.encoder
    }

    /// Get a reference to the channel source.
    pub fn input(&self) -> &I {
        &self.input
    }

    /// Get a mutable reference to the channel source.
    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    /// Get a reference to the report sink.
    pub fn output(&self) -> &O {
        &self.output
    }

    /// Get a mutable reference to the report sink.
    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    /// Decompose the bridge into its source and sink.
    pub fn into_parts(self) -> (I, O) {
        (self.input, self.output)
    }
}

/// Error type for bridge operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BridgeError {
    /// Error from the channel source.
    Input(InputError),
    /// Error from the report sink.
    Output(OutputError),
}
