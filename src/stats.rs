//! Simulation statistics collection and reporting.

/// Counters tracked across a simulation run.
///
/// Retired-instruction counts are split by class; stall counts are split by
/// the hazard rule that fired.
#[derive(Debug, Default)]
pub struct SimStats {
    pub cycles: u64,
    pub instructions_retired: u64,

    pub inst_load: u64,
    pub inst_store: u64,
    pub inst_alu: u64,
    pub inst_cipher: u64,
    pub inst_key_load: u64,
    pub inst_branch: u64,

    pub stalls_load_use: u64,
    pub stalls_key: u64,
    pub stalls_store_data: u64,

    pub branches_taken: u64,
    pub control_flushes: u64,
}

impl SimStats {
    /// Prints a summary report to stdout.
    pub fn print(&self) {
        println!("Simulation Statistics");
        println!("---------------------");
        println!("Cycles:               {}", self.cycles);
        println!("Instructions retired: {}", self.instructions_retired);
        if self.cycles > 0 {
            println!(
                "IPC:                  {:.3}",
                self.instructions_retired as f64 / self.cycles as f64
            );
        }
        println!("  Loads:              {}", self.inst_load);
        println!("  Stores:             {}", self.inst_store);
        println!("  ALU:                {}", self.inst_alu);
        println!("  Cipher:             {}", self.inst_cipher);
        println!("  Key loads:          {}", self.inst_key_load);
        println!("  Branches:           {}", self.inst_branch);
        println!("Stalls (load-use):    {}", self.stalls_load_use);
        println!("Stalls (key order):   {}", self.stalls_key);
        println!("Stalls (store data):  {}", self.stalls_store_data);
        println!("Branches taken:       {}", self.branches_taken);
        println!("Control flushes:      {}", self.control_flushes);
    }
}
