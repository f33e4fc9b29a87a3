// Purpose - external interfaces, file formats

pub mod wav;
