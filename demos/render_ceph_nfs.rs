//! Render a CephNFS with Kerberos and an SSSD sidecar, then import it back
//!
//! ```bash
//! cargo run --example render_ceph_nfs
//! ```

use kube_manifest_provider::{CreateRequest, ProviderBuilder};
use serde_json::json;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let provider = ProviderBuilder::new().with_rook_resources().build();

    let plan = json!({
        "metadata": {
            "name": "my-nfs",
            "namespace": "rook-ceph",
            "labels": { "app.kubernetes.io/part-of": "storage" }
        },
        "spec": {
            "server": {
                "active": 2,
                "log_level": "NIV_INFO",
                "priority_class_name": "system-cluster-critical",
                "resources": {
                    "limits": { "memory": "8Gi" },
                    "requests": { "cpu": "3", "memory": "8Gi" }
                }
            },
            "security": {
                "kerberos": {
                    "principal_name": "nfs",
                    "domain_name": "EXAMPLE.NET",
                    "config_files": {
                        "volume_source": { "config_map": { "name": "krb5-conf" } }
                    },
                    "keytab_file": {
                        "volume_source": {
                            "secret": { "secret_name": "keytab", "default_mode": 384 }
                        }
                    }
                },
                "sssd": {
                    "sidecar": {
                        "image": "registry.access.redhat.com/rhel7/sssd:latest",
                        "sssd_config_file": {
                            "volume_source": { "config_map": { "name": "my-nfs-sssd-config" } }
                        },
                        "additional_files": [{
                            "sub_path": "ca-certs",
                            "volume_source": { "secret": { "secret_name": "sssd-tls" } }
                        }],
                        "debug_level": 0
                    }
                }
            }
        }
    });

    let response = provider.create("k8s_ceph_rook_io_ceph_nfs_v1", CreateRequest { plan })?;
    for diagnostic in &response.diagnostics {
        eprintln!("{}", diagnostic);
    }
    let Some(state) = response.state else {
        return Err("rendering failed".into());
    };

    let yaml = state["yaml"].as_str().unwrap_or_default();
    println!("{}", yaml);

    for imported in provider.import_manifests(yaml)? {
        match imported.state {
            Some(state) => println!("imported {} with id {}", imported.type_name, state["id"]),
            None => eprintln!("failed to import {}", imported.type_name),
        }
    }

    Ok(())
}
