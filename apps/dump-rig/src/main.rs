// This file is part of OpenFA.
//
// OpenFA is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// OpenFA is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with OpenFA.  If not, see <http://www.gnu.org/licenses/>.
use std::fs;

use anyhow::Result;
use structopt::StructOpt;

/// Parse a rig-def file, build it into a `Rig`, and print a summary
#[derive(Debug, StructOpt)]
struct Opt {
    /// The rig-def file to load
    input: String,

    /// Named `section` modules to merge with `root`, in order
    #[structopt(short, long)]
    section: Vec<String>,

    /// Print every diagnostic instead of just a count per severity
    #[structopt(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let opt = Opt::from_args();

    let text = fs::read_to_string(&opt.input)?;
    let file = rigdef::parse(text.lines().map(str::to_string));

    let sections: Vec<&str> = opt.section.iter().map(String::as_str).collect();
    let mut diags = rigdef::error::DiagnosticList::new();
    let rig = rig_builder::build(&file, &sections, &mut diags);

    println!("{}: {} node(s), {} beam(s), {} wheel(s)", opt.input, rig.nodes.len(), rig.beams.len(), rig.wheels.len());
    println!(
        "  cinecams={} shocks={} shocks2={} commands={} hydros={} rotators={} hooks={} ties={}",
        rig.cinecams.len(),
        rig.shocks.len(),
        rig.shocks2.len(),
        rig.commands.len(),
        rig.hydros.len(),
        rig.rotators.len(),
        rig.hooks.len(),
        rig.ties.len(),
    );
    println!(
        "  flexbodies={} props={} submeshes={} wings={} turbojets={} turboprops2={} pistonprops={} screwprops={}",
        rig.flexbodies.len(),
        rig.props.len(),
        rig.submeshes.len(),
        rig.wings.len(),
        rig.turbojets.len(),
        rig.turboprops2.len(),
        rig.pistonprops.len(),
        rig.screwprops.len(),
    );
    if let Some(bb) = &rig.bounding_box {
        println!("  bounding box: {:?} .. {:?}", bb.min, bb.max);
    }
    if let Some(lowest) = rig.lowest_node {
        println!("  lowest node: {lowest}");
    }

    let parse_diags = file.diagnostics.len();
    let build_diags = diags.len();
    println!("  diagnostics: {parse_diags} while parsing, {build_diags} while building");
    if opt.verbose {
        for diag in file.diagnostics.iter().chain(diags.iter()) {
            println!("{diag}");
        }
    }

    if file.diagnostics.has_errors() || diags.has_errors() {
        anyhow::bail!("rig build reported errors; rerun with --verbose for details");
    }

    Ok(())
}
