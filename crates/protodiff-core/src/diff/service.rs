//! Service and RPC method comparison.

use std::collections::HashMap;

use super::model::{Change, Report, StreamSide, TypeSide};
use super::namespace::Namespace;
use crate::model::{MethodDecl, ServiceDecl};

/// Compare every previous service against its same-named counterpart in
/// `current`.
pub fn diff_services(report: &mut Report, previous: &Namespace<'_>, current: &Namespace<'_>) {
    let curr = current.service_index();

    for service in previous.services() {
        match curr.get(service.name.as_str()) {
            Some(next) => diff_service(report, service, next),
            None => report.push(Change::RemovedService {
                service: service.name.clone(),
            }),
        }
    }
}

/// Compare one matched pair of services method by method.
pub fn diff_service(report: &mut Report, previous: &ServiceDecl, current: &ServiceDecl) {
    let curr: HashMap<&str, &MethodDecl> =
        current.methods.iter().map(|m| (m.name.as_str(), m)).collect();

    for method in &previous.methods {
        let Some(next) = curr.get(method.name.as_str()) else {
            report.push(Change::RemovedServiceMethod {
                service: previous.name.clone(),
                method: method.name.clone(),
            });
            continue;
        };

        let types = [
            (TypeSide::Input, &method.input_type, &next.input_type),
            (TypeSide::Output, &method.output_type, &next.output_type),
        ];
        for (side, old_type, new_type) in types {
            if old_type != new_type {
                report.push(Change::ChangedMethodType {
                    service: current.name.clone(),
                    method: method.name.clone(),
                    side,
                    old_type: old_type.clone(),
                    new_type: new_type.clone(),
                });
            }
        }

        let streaming = [
            (
                StreamSide::Client,
                method.client_streaming,
                next.client_streaming,
            ),
            (
                StreamSide::Server,
                method.server_streaming,
                next.server_streaming,
            ),
        ];
        for (side, old_streaming, new_streaming) in streaming {
            if old_streaming != new_streaming {
                report.push(Change::ChangedMethodStreaming {
                    service: current.name.clone(),
                    method: method.name.clone(),
                    side,
                    old_streaming,
                    new_streaming,
                });
            }
        }
    }
}
