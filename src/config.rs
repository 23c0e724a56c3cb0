// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tourdesk-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tourdesk and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

pub const DEFAULT_PORT: u16 = 8088;
pub const DEFAULT_LOG_FILTER: &str = "warn,tourdesk=info";
pub const LOG_FILTER_ENV: &str = "TOURDESK_LOG";

/// Per-image upload ceilings, in KiB.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadLimits {
    pub create_kib: usize,
    pub update_kib: usize,
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self { create_kib: 10_240, update_kib: 2_048 }
    }
}

impl UploadLimits {
    pub fn create_bytes(&self) -> usize {
        self.create_kib.saturating_mul(1024)
    }

    pub fn update_bytes(&self) -> usize {
        self.update_kib.saturating_mul(1024)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind: IpAddr,
    /// `0` asks the OS for an ephemeral port.
    pub port: u16,
    pub uploads: UploadLimits,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            uploads: UploadLimits::default(),
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }

    /// Largest request body the HTTP layer accepts: a handful of create-sized images once
    /// base64 inflates them.
    pub fn body_limit(&self) -> usize {
        self.uploads.create_bytes().saturating_mul(16)
    }
}
