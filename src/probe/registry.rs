//! Static probe registry.
//!
//! One entry per supported follow-up tool: the ports it applies to, the suffix
//! used to name its result file, and its command template. Templates are typed
//! argument vectors with explicit substitution points, never interpolated
//! shell strings. Adding a probe means appending an entry here; nothing in the
//! scan, parse, or partition stages changes.

/// One element of a probe's argument template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateArg {
    /// Fixed argument passed through verbatim.
    Literal(&'static str),
    /// Substituted with the target address.
    Address,
    /// Substituted with the port being probed.
    Port,
}

/// A registered follow-up probe.
#[derive(Debug)]
pub struct ProbeSpec {
    /// Probe name as used by CLI flags and reports.
    pub name: &'static str,
    /// Ports this probe applies to.
    pub ports: &'static [u16],
    /// Result-file suffix: `<stem>_<port>_<suffix>`.
    pub suffix: &'static str,
    /// Binary to execute.
    pub program: &'static str,
    /// Argument template.
    pub args: &'static [TemplateArg],
}

impl ProbeSpec {
    /// Materialize the argument vector for one invocation.
    pub fn argv(&self, addr: &str, port: u16) -> Vec<String> {
        self.args
            .iter()
            .map(|arg| match arg {
                TemplateArg::Literal(s) => (*s).to_string(),
                TemplateArg::Address => addr.to_string(),
                TemplateArg::Port => port.to_string(),
            })
            .collect()
    }
}

use TemplateArg::{Address, Literal, Port};

static REGISTRY: &[ProbeSpec] = &[
    ProbeSpec {
        name: "nikto",
        ports: &[80, 443, 8080],
        suffix: "nikto",
        program: "nikto",
        args: &[Literal("-h"), Address, Literal("-p"), Port],
    },
    ProbeSpec {
        name: "enum4linux",
        ports: &[137, 139, 445],
        suffix: "enum4linux",
        program: "enum4linux",
        args: &[Literal("-a"), Address],
    },
    ProbeSpec {
        name: "showmount",
        ports: &[2049],
        suffix: "showmount",
        program: "showmount",
        args: &[Literal("-e"), Address],
    },
    ProbeSpec {
        name: "ftp-anon",
        ports: &[21],
        suffix: "ftp-anon",
        program: "nmap",
        args: &[
            Literal("-Pn"),
            Literal("-p"),
            Port,
            Literal("--script"),
            Literal("ftp-anon"),
            Address,
        ],
    },
    ProbeSpec {
        name: "vnc",
        ports: &[5900],
        suffix: "vnc",
        program: "nmap",
        args: &[
            Literal("-Pn"),
            Literal("-p"),
            Port,
            Literal("--script"),
            Literal("vnc-info"),
            Address,
        ],
    },
    ProbeSpec {
        name: "smtp-relay",
        ports: &[25],
        suffix: "smtp-relay",
        program: "nmap",
        args: &[
            Literal("-Pn"),
            Literal("-p"),
            Port,
            Literal("--script"),
            Literal("smtp-open-relay"),
            Address,
        ],
    },
    ProbeSpec {
        name: "mysql",
        ports: &[3306],
        suffix: "mysql",
        program: "nmap",
        args: &[
            Literal("-Pn"),
            Literal("-p"),
            Port,
            Literal("--script"),
            Literal("mysql-info"),
            Address,
        ],
    },
    ProbeSpec {
        name: "mssql",
        ports: &[1433],
        suffix: "mssql",
        program: "nmap",
        args: &[
            Literal("-Pn"),
            Literal("-p"),
            Port,
            Literal("--script"),
            Literal("ms-sql-info"),
            Address,
        ],
    },
];

/// All registered probes, in registry order.
pub fn all() -> &'static [ProbeSpec] {
    REGISTRY
}

/// Look up a probe by name.
pub fn find(name: &str) -> Option<&'static ProbeSpec> {
    REGISTRY.iter().find(|spec| spec.name == name)
}
