use anyhow::{Result, bail};
use msc_core::mentor::{Mentor, MentorDirectory};

fn print(mentor: &Mentor) {
    println!("{:<3} {:<24} {} ({})", mentor.id, mentor.name, mentor.title, mentor.degree);
}

pub fn show(id: Option<&str>) -> Result<()> {
    match id {
        Some(id) => match MentorDirectory::find(id) {
            Some(mentor) => print(mentor),
            None => bail!("No mentor '{}'", id),
        },
        None => MentorDirectory::all().iter().for_each(print),
    }
    Ok(())
}
