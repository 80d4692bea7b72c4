// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! OPC UA for Devices (DI) structures used by parameter transfer.

use crate::config::{DI_NAMESPACE, DI_TYPES_XSD};
use crate::types::{DiagnosticInfo, QualifiedName, StatusCode};
use crate::Encodeable;

/// Outcome of reading or writing one parameter.
#[derive(Debug, Clone, PartialEq, Default, Encodeable)]
#[encodeable(namespace = DI_NAMESPACE, xml_namespace = DI_TYPES_XSD,
             data_type = 6525, binary_encoding = 6535, xml_encoding = 6527)]
pub struct ParameterResultDataType {
    /// Browse path from the device's ParameterSet to the parameter.
    pub node_path: Vec<QualifiedName>,
    pub status_code: StatusCode,
    pub diagnostics: DiagnosticInfo,
}

/// Parameter results of one FetchTransferResultData call.
#[derive(Debug, Clone, PartialEq, Default, Encodeable)]
#[encodeable(namespace = DI_NAMESPACE, xml_namespace = DI_TYPES_XSD,
             data_type = 15889, binary_encoding = 15892, xml_encoding = 15901)]
pub struct TransferResultDataDataType {
    pub sequence_number: i32,
    pub end_of_results: bool,
    pub parameter_defs: ParameterResultDataTypeCollection,
}

/// Failed transfer.
#[derive(Debug, Clone, PartialEq, Default, Encodeable)]
#[encodeable(namespace = DI_NAMESPACE, xml_namespace = DI_TYPES_XSD,
             data_type = 15888, binary_encoding = 15891, xml_encoding = 15900)]
pub struct TransferResultErrorDataType {
    pub status: i32,
    pub diagnostics: DiagnosticInfo,
}
