pub mod a001_tin_record;
