//! Employee database demo.
//!
//! A line-oriented menu over either container: `a` adds an employee, `d`
//! deletes one by id, `l` lists them in id order and `q` quits.

use std::error::Error;
use std::io::{self, BufRead, Write};

use clap::{Parser, ValueEnum};
use keepers::{Array, ContainerError, Dispose, Rejected, Sequence};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Store {
    /// The linked sequence, walked with its cursor.
    Sequence,
    /// The contiguous array, scanned by index.
    Array,
}

#[derive(Debug, Parser)]
#[command(about = "Employee database over a keepers container")]
struct Args {
    /// Which container holds the employees.
    #[arg(long, value_enum, default_value_t = Store::Sequence, env = "KEEPERS_STORE")]
    store: Store,
    /// Initial capacity of the array store.
    #[arg(long, default_value_t = 1)]
    capacity: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Employee {
    id: u32,
    name: String,
}

/// The operations the menu needs from a container.
trait Roster {
    /// Insert keeping the employees ordered by id.
    fn add(&mut self, employee: Employee) -> Result<(), Rejected<Employee>>;

    fn delete(&mut self, id: u32) -> Result<(), ContainerError>;

    fn list(&mut self) -> Vec<(String, u32)>;

    fn header(&self) -> String;
}

impl<D> Roster for Sequence<Employee, D>
where
    D: Dispose<Employee>,
{
    fn add(&mut self, employee: Employee) -> Result<(), Rejected<Employee>> {
        let mut curr = self.iterator_begin().map(|e| e.id);
        while let Some(id) = curr {
            if id > employee.id {
                self.iterator_insert_before(employee);
                return Ok(());
            }
            curr = self.iterator_next().map(|e| e.id);
        }
        self.append(employee);
        Ok(())
    }

    fn delete(&mut self, id: u32) -> Result<(), ContainerError> {
        self.remove_by(&id, |id, e: &Employee| id.cmp(&e.id))
    }

    fn list(&mut self) -> Vec<(String, u32)> {
        let row = |e: &Employee| (e.name.clone(), e.id);
        let mut rows = Vec::new();
        let mut curr = self.iterator_begin().map(row);
        while let Some(r) = curr {
            rows.push(r);
            curr = self.iterator_next().map(row);
        }
        rows
    }

    fn header(&self) -> String { format!("Employee Database ({}):", self.len()) }
}

impl<D> Roster for Array<Employee, D>
where
    D: Dispose<Employee>,
{
    fn add(&mut self, employee: Employee) -> Result<(), Rejected<Employee>> {
        match self.iter().position(|e| e.id > employee.id) {
            Some(index) => self.insert(employee, index),
            None => self.append(employee),
        }
    }

    fn delete(&mut self, id: u32) -> Result<(), ContainerError> {
        let index = self
            .iter()
            .position(|e| e.id == id)
            .ok_or(ContainerError::ItemNotFound)?;
        self.remove(index)
    }

    fn list(&mut self) -> Vec<(String, u32)> {
        self.iter().map(|e| (e.name.clone(), e.id)).collect()
    }

    fn header(&self) -> String {
        format!("Employee Database ({}/{}):", self.len(), self.capacity())
    }
}

fn release(employee: Employee) {
    info!(id = employee.id, name = %employee.name, "employee released");
}

/// Print `label`, then read one trimmed line. [`None`] at end of input.
fn prompt<R, W>(input: &mut R, output: &mut W, label: &str) -> io::Result<Option<String>>
where
    R: BufRead,
    W: Write,
{
    write!(output, "{}", label)?;
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Drive the menu until `q` or end of input.
fn run<R, W, S>(roster: &mut S, input: &mut R, output: &mut W) -> io::Result<()>
where
    R: BufRead,
    W: Write,
    S: Roster,
{
    loop {
        writeln!(output, "{}\n", roster.header())?;
        writeln!(output, "[A]dd employee")?;
        writeln!(output, "[D]elete employee")?;
        writeln!(output, "[L]ist employee(s)")?;
        writeln!(output, "[Q]uit\n")?;

        let Some(choice) = prompt(input, output, ":")? else {
            return Ok(());
        };

        match choice.chars().next().map(|c| c.to_ascii_lowercase()) {
            Some('a') => {
                let Some(name) = prompt(input, output, "Name:  ")? else {
                    return Ok(());
                };
                let Some(id) = prompt(input, output, "ID:  ")? else {
                    return Ok(());
                };
                let Ok(id) = id.parse::<u32>() else {
                    writeln!(output, "\nInvalid ID {:?}!\n", id)?;
                    continue;
                };
                let name = name.split_whitespace().next().unwrap_or_default().to_string();
                if let Err(rejected) = roster.add(Employee { id, name }) {
                    writeln!(output, "\nCould not add employee: {}\n", rejected)?;
                }
            }
            Some('d') => {
                let Some(id) = prompt(input, output, "Employee ID:  ")? else {
                    return Ok(());
                };
                match id.parse::<u32>().map(|id| (id, roster.delete(id))) {
                    Ok((_, Ok(()))) => {}
                    Ok((id, Err(err))) => {
                        debug!(id, %err, "delete failed");
                        writeln!(output, "\nEmployee ID {} not found!\n", id)?;
                    }
                    Err(_) => writeln!(output, "\nInvalid ID {:?}!\n", id)?,
                }
            }
            Some('l') => {
                for (name, id) in roster.list() {
                    writeln!(output, " * {} ({})", name, id)?;
                }
            }
            Some('q') => return Ok(()),
            _ => {}
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    debug!(?args, "starting");

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    match args.store {
        Store::Sequence => {
            let mut roster: Sequence<Employee, _> = Sequence::new(release);
            run(&mut roster, &mut input, &mut output)?;
            roster.destroy();
        }
        Store::Array => {
            let mut roster: Array<Employee, _> = Array::with_capacity(args.capacity, release)?;
            run(&mut roster, &mut input, &mut output)?;
            roster.destroy();
        }
    }

    Ok(())
}
