use anyhow::{Context, Result};
use serialport::{SerialPort, SerialPortInfo, SerialPortType};
use std::io::{Read, Write};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::SessionConfig;
use crate::protocol::{hex_dump, is_handshake_response, read_line, HANDSHAKE_REQUEST};

/// Discovery failures that end the session attempt
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Failed to enumerate serial ports")]
    Enumeration(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),

    #[error("No compatible devices found (VID={vid:#06x}, PID={pid:#06x}, {tried} candidate(s) tried)")]
    NoDevice { vid: u16, pid: u16, tried: usize },
}

/// Source of candidate ports and the means to open them
pub trait DeviceBackend {
    type Port: Read + Write;

    /// Names of ports worth probing, in probe order
    fn candidates(&self, config: &SessionConfig) -> Result<Vec<String>>;

    fn open(&self, name: &str, config: &SessionConfig) -> Result<Self::Port>;
}

/// Real serial ports found through the OS
pub struct SerialBackend;

impl DeviceBackend for SerialBackend {
    type Port = Box<dyn SerialPort>;

    fn candidates(&self, config: &SessionConfig) -> Result<Vec<String>> {
        if let Some(port) = &config.port {
            return Ok(vec![port.clone()]);
        }

        let ports = serialport::available_ports().context("Failed to list serial ports")?;

        Ok(usb_candidates(ports, config))
    }

    fn open(&self, name: &str, config: &SessionConfig) -> Result<Self::Port> {
        let mut port = serialport::new(name, config.baud_rate)
            .data_bits(serialport::DataBits::Eight)
            .parity(serialport::Parity::None)
            .stop_bits(serialport::StopBits::One)
            .flow_control(serialport::FlowControl::None)
            .timeout(config.read_timeout)
            .open()
            .context(format!("Failed to open serial port {}", name))?;

        if let Err(e) = port.write_data_terminal_ready(true) {
            warn!("Failed to set DTR on {}: {}", name, e);
        }

        Ok(port)
    }
}

/// Names of USB ports whose descriptor matches the configured VID/PID,
/// in enumeration order
pub fn usb_candidates(ports: Vec<SerialPortInfo>, config: &SessionConfig) -> Vec<String> {
    ports
        .into_iter()
        .filter_map(|info| match info.port_type {
            SerialPortType::UsbPort(usb)
                if usb.vid == config.vendor_id && usb.pid == config.product_id =>
            {
                Some(info.port_name)
            }
            _ => None,
        })
        .collect()
}

/// An open port that answered the handshake
pub struct DeviceChannel<P> {
    name: String,
    port: P,
}

impl<P> DeviceChannel<P> {
    pub fn new(name: impl Into<String>, port: P) -> Self {
        DeviceChannel {
            name: name.into(),
            port,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn into_port(self) -> P {
        self.port
    }
}

impl DeviceChannel<Box<dyn SerialPort>> {
    /// Independent handle on the same port for the monitor thread.
    ///
    /// The renderer only ever writes and the monitor only ever reads, so the
    /// two handles never contend for one direction.
    pub fn try_clone_reader(&self) -> Result<Box<dyn SerialPort>> {
        self.port
            .try_clone()
            .context(format!("Failed to clone serial port {}", self.name))
    }
}

/// Probe every candidate in order and return the first that answers.
///
/// A candidate that cannot be opened, written or read is skipped like one
/// that answers with the wrong bytes.
pub fn connect<B: DeviceBackend>(
    backend: &B,
    config: &SessionConfig,
) -> Result<DeviceChannel<B::Port>, SessionError> {
    let candidates = backend
        .candidates(config)
        .map_err(|e| SessionError::Enumeration(e.into()))?;

    debug!(
        "Connected USB serial devices (VID={:#06x}, PID={:#06x}): {:?}",
        config.vendor_id, config.product_id, candidates
    );

    for name in &candidates {
        debug!("Attempting connection to {}...", name);

        match probe(backend, name, config) {
            Ok(port) => {
                info!(
                    "Connected to serial port {} with baud rate {}, timeout={:?}",
                    name, config.baud_rate, config.read_timeout
                );
                return Ok(DeviceChannel::new(name.clone(), port));
            }
            Err(e) => debug!("Handshake with {} failed: {:#}", name, e),
        }
    }

    Err(SessionError::NoDevice {
        vid: config.vendor_id,
        pid: config.product_id,
        tried: candidates.len(),
    })
}

fn probe<B: DeviceBackend>(backend: &B, name: &str, config: &SessionConfig) -> Result<B::Port> {
    let mut port = backend.open(name, config)?;
    debug!("Opened {}. Beginning handshake...", name);
    handshake(&mut port)?;
    Ok(port)
}

/// Send the identification request and check the reply line
pub fn handshake<P: Read + Write + ?Sized>(port: &mut P) -> Result<()> {
    port.write_all(&HANDSHAKE_REQUEST)
        .context("Failed to write handshake")?;
    port.flush().context("Failed to flush handshake")?;

    let line = read_line(port).context("Failed to read handshake response")?;
    debug!("Device responded with [{}]", hex_dump(&line));

    if !is_handshake_response(&line) {
        anyhow::bail!("Unexpected response [{}]", hex_dump(&line));
    }

    debug!("Handshake success");
    Ok(())
}
